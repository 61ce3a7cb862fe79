//! Selection prompt rendering.
//!
//! # Responsibility
//! - Render day groups into a navigable text menu.
//! - Produce the slot id lookup consumed by the selection parser.
//!
//! # Invariants
//! - Rendered slot ids follow timestamp order even if the caller's slot
//!   order is not chronological.
//! - Every rendered slot id has exactly one lookup entry.

pub mod compiler;
