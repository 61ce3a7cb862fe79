//! Selection mini-language and confirmation formatting.
//!
//! # Responsibility
//! - Tokenize free-form answers into slot, day and period references.
//! - Resolve references against the grid model into an ordered, deduplicated
//!   timestamp list.
//! - Render timestamp lists back into per-date confirmation lines.
//!
//! # Invariants
//! - Lookup misses contribute nothing; they are never errors.
//! - Output order is first-seen order across the input.

pub mod parser;
pub mod readable;
pub mod token;
