//! Selection parser.
//!
//! # Responsibility
//! - Choose between raw timestamp list mode and token mode.
//! - Resolve tokens against the slot lookup and day groups.
//! - Deduplicate while keeping first-occurrence order.
//!
//! # Invariants
//! - Raw list mode never falls back to token parsing.
//! - Unknown slot ids, missing days and unparsable fields contribute nothing.
//! - Slot codes are looked up as written (case-insensitively), so `d01t0`
//!   misses unless the lookup holds that exact key.
//! - Parsing never fails; an empty result is valid.

use crate::model::grid::{find_day, DayGroup, SlotLookup};
use crate::model::zone::DisplayZone;
use crate::selection::readable::format_selection;
use crate::selection::token::{is_raw_timestamp_list, SelectionToken};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the input was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    RawTimestamps,
    Codes,
}

/// Canonical selection outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub mode: SelectionMode,
    /// Unique timestamps in first-seen order.
    pub timestamps: Vec<i64>,
    /// Per-date confirmation lines for `timestamps`.
    pub readable: Vec<String>,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Interprets a free-form answer against the grid model.
///
/// `lookup` must come from the same `days` passed here, otherwise slot codes
/// silently miss.
pub fn parse_selection(
    input: &str,
    days: &[DayGroup],
    lookup: &SlotLookup,
    zone: DisplayZone,
) -> SelectionResult {
    let (mode, collected) = if is_raw_timestamp_list(input) {
        (SelectionMode::RawTimestamps, parse_raw_list(input))
    } else {
        (SelectionMode::Codes, resolve_tokens(input, days, lookup, zone))
    };

    let timestamps = dedup_preserving_order(collected);
    let readable = format_selection(&timestamps, days, zone);
    debug!(
        "event=selection_parse module=selection status=ok mode={:?} selected={}",
        mode,
        timestamps.len()
    );

    SelectionResult {
        mode,
        timestamps,
        readable,
    }
}

fn parse_raw_list(input: &str) -> Vec<i64> {
    input
        .split(',')
        .filter_map(|field| field.trim().parse::<u64>().ok())
        .filter_map(|value| i64::try_from(value).ok())
        .collect()
}

fn resolve_tokens(
    input: &str,
    days: &[DayGroup],
    lookup: &SlotLookup,
    zone: DisplayZone,
) -> Vec<i64> {
    let mut collected = Vec::new();
    let mut ignored = 0usize;

    for word in input.split_whitespace() {
        match SelectionToken::parse(word) {
            SelectionToken::SlotRef { .. } => {
                if let Some(timestamp) = lookup.resolve(word) {
                    collected.push(timestamp);
                }
            }
            SelectionToken::DayRef { day } => {
                if let Some(group) = find_day(days, day) {
                    collected.extend(group.timestamps());
                }
            }
            SelectionToken::PeriodRef { day, period } => {
                if let Some(group) = find_day(days, day) {
                    collected.extend(group.timestamps().filter(|timestamp| {
                        zone.hour(*timestamp)
                            .is_some_and(|hour| period.contains_hour(hour))
                    }));
                }
            }
            SelectionToken::Unrecognized => ignored += 1,
        }
    }

    if ignored > 0 {
        debug!(
            "event=selection_tokens module=selection status=partial ignored={}",
            ignored
        );
    }
    collected
}

fn dedup_preserving_order(timestamps: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(timestamps.len());
    timestamps
        .into_iter()
        .filter(|timestamp| seen.insert(*timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{dedup_preserving_order, parse_raw_list, parse_selection, SelectionMode};
    use crate::model::grid::SlotLookup;
    use crate::model::zone::DisplayZone;

    #[test]
    fn dedup_keeps_first_occurrence() {
        assert_eq!(dedup_preserving_order(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn raw_list_skips_non_numeric_fields() {
        assert_eq!(parse_raw_list("100, 200 ,abc,, -5, 300"), vec![100, 200, 300]);
    }

    #[test]
    fn raw_mode_never_tokenizes() {
        let mut lookup = SlotLookup::new();
        lookup.insert("d0t0", 900);
        let result = parse_selection("100, 200, d0t0", &[], &lookup, DisplayZone::default());
        assert_eq!(result.mode, SelectionMode::RawTimestamps);
        assert_eq!(result.timestamps, vec![100, 200]);
    }

    #[test]
    fn unrecognized_input_is_an_empty_result() {
        let result = parse_selection(
            "whenever works",
            &[],
            &SlotLookup::new(),
            DisplayZone::default(),
        );
        assert_eq!(result.mode, SelectionMode::Codes);
        assert!(result.is_empty());
        assert!(result.readable.is_empty());
    }

    #[test]
    fn slot_codes_must_match_a_lookup_key_exactly() {
        let mut lookup = SlotLookup::new();
        lookup.insert("d1t0", 900);
        let zone = DisplayZone::default();

        let padded = parse_selection("d01t0 d1t00", &[], &lookup, zone);
        assert!(padded.is_empty());

        let exact = parse_selection("D1T0", &[], &lookup, zone);
        assert_eq!(exact.timestamps, vec![900]);
    }
}
