//! Grid normalizer.
//!
//! # Responsibility
//! - Partition raw cells by day column.
//! - Assign chronological slot ids and compress contiguous slots into blocks.
//! - Derive weekday/date labels in the caller's display zone.
//!
//! # Invariants
//! - Output is ordered by `day_index` ascending; columns without cells are
//!   omitted.
//! - Sorting uses `timestamp`; `row` only breaks exact ties.
//! - Empty input yields an empty result, never an error.

use crate::model::cell::RawCell;
use crate::model::grid::{DayGroup, TimeBlock, TimeSlot};
use crate::model::zone::DisplayZone;
use crate::model::SLOT_SECONDS;
use log::debug;
use std::collections::BTreeMap;

/// Builds the day/slot/block model from raw cells.
///
/// Cells are not validated here; run `validate_cells` first when the source
/// is untrusted.
pub fn normalize_cells(cells: &[RawCell], zone: DisplayZone) -> Vec<DayGroup> {
    let mut by_day = BTreeMap::<u32, Vec<&RawCell>>::new();
    for cell in cells {
        by_day.entry(cell.day).or_default().push(cell);
    }

    let days = by_day
        .into_iter()
        .map(|(day_index, mut day_cells)| {
            day_cells.sort_by_key(|cell| (cell.timestamp, cell.row));
            build_day(day_index, &day_cells, zone)
        })
        .collect::<Vec<_>>();

    debug!(
        "event=grid_normalize module=grid status=ok cells={} days={} zone={}",
        cells.len(),
        days.len(),
        zone
    );
    days
}

fn build_day(day_index: u32, sorted: &[&RawCell], zone: DisplayZone) -> DayGroup {
    let slots = sorted
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let mut slot = TimeSlot::from_cell(cell, index);
            if slot.label.trim().is_empty() {
                slot.label = zone.time_label(slot.timestamp);
            }
            slot
        })
        .collect::<Vec<_>>();

    // Partitions are never empty, but keep the label derivation total.
    let first_timestamp = slots.first().map(|slot| slot.timestamp).unwrap_or_default();

    DayGroup {
        day_index,
        weekday_name: zone.weekday_name(first_timestamp),
        full_date_label: zone.full_date_label(first_timestamp),
        blocks: compress_blocks(&slots),
        slots,
    }
}

/// Run-length encodes chronologically sorted slots into contiguous blocks.
pub fn compress_blocks(slots: &[TimeSlot]) -> Vec<TimeBlock> {
    let mut blocks = Vec::new();
    let mut run: Vec<&TimeSlot> = Vec::new();

    for slot in slots {
        if let Some(previous) = run.last() {
            if previous.timestamp.checked_add(SLOT_SECONDS) != Some(slot.timestamp) {
                blocks.push(close_block(&run));
                run.clear();
            }
        }
        run.push(slot);
    }
    if !run.is_empty() {
        blocks.push(close_block(&run));
    }

    blocks
}

fn close_block(run: &[&TimeSlot]) -> TimeBlock {
    let first = run[0];
    let last = run[run.len() - 1];
    TimeBlock {
        start_timestamp: first.timestamp,
        end_timestamp: last.timestamp,
        start_label: first.label.clone(),
        end_label: last.label.clone(),
        timestamps: run.iter().map(|slot| slot.timestamp).collect(),
    }
}
