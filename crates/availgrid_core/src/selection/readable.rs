//! Readable confirmation formatter.
//!
//! Groups a timestamp list by calendar date, keeping dates in first-seen
//! order and times in input order. Known slots keep their site label;
//! timestamps outside the model are formatted in the display zone.

use crate::model::grid::DayGroup;
use crate::model::zone::DisplayZone;
use chrono::NaiveDate;
use std::collections::HashMap;

const UNKNOWN_DATE_LABEL: &str = "Unknown date";

/// Renders `"{date}: {time}, {time}"` lines, one per calendar date touched.
pub fn format_selection(timestamps: &[i64], days: &[DayGroup], zone: DisplayZone) -> Vec<String> {
    let labels = days
        .iter()
        .flat_map(|day| day.slots.iter())
        .map(|slot| (slot.timestamp, slot.label.as_str()))
        .collect::<HashMap<i64, &str>>();

    let mut groups: Vec<(Option<NaiveDate>, Vec<String>)> = Vec::new();
    for &timestamp in timestamps {
        let date = zone.calendar_date(timestamp);
        let time = match labels.get(&timestamp) {
            Some(label) => (*label).to_string(),
            None => zone.time_label(timestamp),
        };
        match groups.iter_mut().find(|(key, _)| *key == date) {
            Some((_, times)) => times.push(time),
            None => groups.push((date, vec![time])),
        }
    }

    groups
        .into_iter()
        .map(|(date, times)| {
            let heading = date
                .map(DisplayZone::short_date_label)
                .unwrap_or_else(|| UNKNOWN_DATE_LABEL.to_string());
            format!("{heading}: {}", times.join(", "))
        })
        .collect()
}
