//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate grid sources and submission agents into use-case level APIs.
//! - Keep tool/CLI layers decoupled from collaborator details.

pub mod grid_service;
pub mod submission_service;
