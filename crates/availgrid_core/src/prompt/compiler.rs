//! Prompt compiler: day groups in, menu text plus slot lookup out.

use crate::model::grid::{slot_id, DayGroup, SlotLookup, TimeBlock, TimeSlot};
use crate::model::zone::DisplayZone;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const EMPTY_GRID_MESSAGE: &str = "No available time slots were found on this grid.";
const RAW_EXAMPLE_FALLBACK: &str = "1736157600, 1736158500";

/// Rendered menu and the lookup that resolves its slot codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPrompt {
    pub menu: String,
    pub lookup: SlotLookup,
}

/// Renders `days` into a selection menu.
///
/// Pure rendering: no validation, no I/O.
pub fn compile_prompt(days: &[DayGroup], zone: DisplayZone) -> CompiledPrompt {
    let mut lookup = SlotLookup::new();
    let mut menu = String::new();

    if days.is_empty() {
        menu.push_str(EMPTY_GRID_MESSAGE);
        menu.push('\n');
        return CompiledPrompt { menu, lookup };
    }

    menu.push_str("Available time slots:\n");
    let mut raw_example = Vec::with_capacity(2);

    for day in days {
        let mut slots = day.slots.iter().collect::<Vec<&TimeSlot>>();
        slots.sort_by_key(|slot| slot.timestamp);

        let _ = writeln!(menu, "\n{} ({})", day.full_date_label, day.weekday_name);
        if !day.blocks.is_empty() {
            let _ = writeln!(menu, "  blocks: {}", render_blocks(&day.blocks));
        }

        for (index, slot) in slots.iter().enumerate() {
            let id = slot_id(day.day_index, index);
            let _ = writeln!(
                menu,
                "  [{id}] {} ({})",
                zone.time_label(slot.timestamp),
                slot.timestamp
            );
            lookup.insert(&id, slot.timestamp);
            if raw_example.len() < 2 {
                raw_example.push(slot.timestamp.to_string());
            }
        }
    }

    menu.push_str(&render_instructions(&raw_example));

    debug!(
        "event=prompt_compile module=prompt status=ok days={} slots={}",
        days.len(),
        lookup.len()
    );
    CompiledPrompt { menu, lookup }
}

fn render_blocks(blocks: &[TimeBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            if block.len() == 1 {
                block.start_label.clone()
            } else {
                format!("{} - {}", block.start_label, block.end_label)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_instructions(raw_example: &[String]) -> String {
    let example = if raw_example.len() == 2 {
        raw_example.join(", ")
    } else {
        RAW_EXAMPLE_FALLBACK.to_string()
    };

    let mut text = String::from("\nHow to answer (separate codes with spaces):\n");
    text.push_str("  d0t3        one slot, by its code in brackets\n");
    text.push_str("  day0        every slot on day 0\n");
    text.push_str("  morning0    day 0 slots from 6:00 AM to 11:59 AM\n");
    text.push_str("  afternoon0  day 0 slots from 12:00 PM to 4:59 PM\n");
    text.push_str("  evening0    day 0 slots from 5:00 PM to 11:59 PM\n");
    let _ = writeln!(text, "Or paste raw timestamps separated by commas, e.g. {example}");
    text
}
