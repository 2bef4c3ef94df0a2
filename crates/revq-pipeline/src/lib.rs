//! Pipeline engine for revq.
//!
//! A [`Pipeline`] is an ordered collection of named [`PipelineStep`]s executed
//! strictly in configuration order against a shared [`PipelineContext`]. Each
//! step names a callable in a [`StepRegistry`]; resolution happens at
//! invocation time, never earlier, so a misconfigured reference only fails
//! when its step actually runs. Steps are filtered by the current
//! [`Environment`]: an ineligible step is skipped and leaves no trace in the
//! accumulated output.
//!
//! Execution is synchronous and fail-fast. A step error aborts the run
//! immediately; outputs of already-completed steps stay visible on the
//! context for the caller to inspect.

mod env;
mod pipeline;
mod registry;

pub use env::{Environment, running_in_github_action};
pub use pipeline::{OUTPUT_KEY, Pipeline, PipelineContext, PipelineStep};
pub use registry::{StepFn, StepOutput, StepRegistry};
