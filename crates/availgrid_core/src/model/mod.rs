//! Availability grid domain model.
//!
//! # Responsibility
//! - Define the raw cell shape handed over by grid sources.
//! - Define the normalized day/slot/block projection used by prompt,
//!   selection and formatting code.
//! - Own the display zone used to turn UTC timestamps into wall-clock labels.
//!
//! # Invariants
//! - Every slot is identified by its UTC `timestamp`, unique across the grid.
//! - Timestamps sit on the 15-minute grid (`SLOT_SECONDS`).
//! - Normalized values are immutable once built.

pub mod cell;
pub mod grid;
pub mod zone;

/// Width of one grid cell in seconds.
pub const SLOT_SECONDS: i64 = 900;
