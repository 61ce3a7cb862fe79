//! Grid normalization entry points.
//!
//! # Responsibility
//! - Turn flat raw cells into chronological day groups and time blocks.
//!
//! # See also
//! - `crate::model::grid` for the produced shapes.

pub mod normalize;
