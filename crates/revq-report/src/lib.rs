//! Code review report model for revq.
//!
//! A [`Report`] aggregates reviewer findings ([`Issue`]) keyed by file, each
//! owning zero or more line-range annotations ([`AffectedCode`]). The module
//! guarantees two structural contracts:
//!
//! - **Identity and ordering**: flattening the per-file mapping always yields
//!   sequential ids `1..=N` in file-insertion-then-entry order, and the same
//!   input mapping always produces the same assignment.
//! - **Round trip**: a report saved to JSON and reloaded reproduces the same
//!   flattened ordering, ids, and field values.
//!
//! Rendering ([`Report::render`]) is pure; persistence goes through atomic
//! writes so a crash never leaves a truncated report behind.

mod model;
mod persist;
mod render;

pub use model::{AffectedCode, Issue, Report};
pub use render::ReportFormat;
