//! Normalized day/slot/block projection of an availability grid.
//!
//! # Invariants
//! - `TimeSlot::id` is `d<day>t<index>` where `index` follows timestamp order.
//! - Blocks of one day are disjoint, chronological and cover every slot.
//! - `SlotLookup` keys are stored lowercase and resolved case-insensitively.

use crate::model::cell::RawCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Builds the canonical slot id for `day` and in-day `index`.
pub fn slot_id(day: u32, index: usize) -> String {
    format!("d{day}t{index}")
}

/// A raw cell annotated with its chronological slot id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub timestamp: i64,
    pub day: u32,
    pub row: u32,
    pub label: String,
}

impl TimeSlot {
    pub fn from_cell(cell: &RawCell, index: usize) -> Self {
        Self {
            id: slot_id(cell.day, index),
            timestamp: cell.timestamp,
            day: cell.day,
            row: cell.row,
            label: cell.label.clone(),
        }
    }
}

/// Maximal run of 15-minute contiguous slots inside one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start_timestamp: i64,
    /// Timestamp of the last member slot (not the exclusive end).
    pub end_timestamp: i64,
    pub start_label: String,
    pub end_label: String,
    pub timestamps: Vec<i64>,
}

impl TimeBlock {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// All slots and blocks of one scheduling day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    pub day_index: u32,
    pub weekday_name: String,
    pub full_date_label: String,
    pub slots: Vec<TimeSlot>,
    pub blocks: Vec<TimeBlock>,
}

impl DayGroup {
    /// Slot timestamps in slot order.
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.slots.iter().map(|slot| slot.timestamp)
    }
}

/// Finds a day by its column index.
pub fn find_day(days: &[DayGroup], day_index: u32) -> Option<&DayGroup> {
    days.iter().find(|day| day.day_index == day_index)
}

/// Slot id to timestamp mapping produced by the prompt compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLookup {
    entries: BTreeMap<String, i64>,
}

impl SlotLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one id. A later insert for the same id replaces the earlier one.
    pub fn insert(&mut self, id: &str, timestamp: i64) {
        self.entries.insert(id.to_ascii_lowercase(), timestamp);
    }

    /// Resolves an id regardless of letter case.
    pub fn resolve(&self, id: &str) -> Option<i64> {
        self.entries.get(id.trim().to_ascii_lowercase().as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(id, ts)| (id.as_str(), *ts))
    }
}
