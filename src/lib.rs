//! revq - AI-assisted code review reports and pipeline automation.
//!
//! revq turns raw per-file review findings (produced by an external LLM
//! collaborator) into a typed [`Report`], renders it for terminals or as
//! Markdown, persists it as JSON with a strict round-trip contract, and runs
//! an environment-filtered [`Pipeline`] of follow-up steps: posting the
//! review as a pull-request comment, tidying outdated comments, fetching the
//! tracker issue associated with the branch.
//!
//! revq can be used in two ways:
//! - **CLI**: the `revq` binary renders stored reports and runs the
//!   configured pipeline.
//! - **Library**: the workspace crates (`revq-report`, `revq-pipeline`,
//!   `revq-config`) are re-exported here for embedding.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Render the stored report for the terminal
//! revq render
//!
//! # Render as Markdown (what gets posted to a PR)
//! revq render --format markdown
//!
//! # Run the configured pipeline steps against the stored report
//! revq pipeline
//! ```

pub mod cli;
pub mod github;
pub mod steps;
pub mod trackers;

pub use revq_config::ProjectConfig;
pub use revq_pipeline::{
    Environment, Pipeline, PipelineContext, PipelineStep, StepFn, StepOutput, StepRegistry,
};
pub use revq_report::{AffectedCode, Issue, Report, ReportFormat};
