//! Shared infrastructure for the revq workspace.
//!
//! This crate holds the pieces every other revq crate leans on: the typed
//! error taxonomy, tracing initialization, the extension-to-language hint
//! table, and atomic file writes for report persistence.

pub mod atomic_write;
pub mod error;
pub mod logging;
pub mod syntax;
