//! Step registry: named callables resolved at execution time.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::Value;

use revq_utils::error::PipelineError;

use crate::pipeline::PipelineContext;

/// What a step invocation produced.
///
/// An explicit variant type instead of runtime type inspection: the engine
/// always records the raw result under the step's name, and additionally
/// flattens [`StepOutput::Update`] entries into the shared accumulator so a
/// later step can refer to a produced key without knowing which step produced
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutput {
    /// Structured context update; entries are merged into `pipeline_out`.
    Update(IndexMap<String, Value>),
    /// Opaque result recorded under the step's name only.
    Value(Value),
}

impl StepOutput {
    /// Convenience constructor for a single-entry update.
    #[must_use]
    pub fn update(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Update(IndexMap::from([(key.into(), value.into())]))
    }
}

/// Signature every registered step callable must match.
///
/// The callable receives the full accumulated context (seeded values plus
/// everything earlier steps produced) and returns its output, or an error
/// which the engine propagates untouched.
pub type StepFn = fn(&PipelineContext) -> anyhow::Result<StepOutput>;

/// Explicit mapping from callable reference to function, populated at
/// startup.
///
/// Steps name their callable by registry key; [`StepRegistry::resolve`] is
/// called once per step invocation and never cached, so a registry swapped
/// between runs takes effect immediately.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    entries: BTreeMap<String, StepFn>,
}

impl StepRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, call: StepFn) -> &mut Self {
        self.entries.insert(name.into(), call);
        self
    }

    /// Resolve a callable reference.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnknownStep`] when nothing is registered under
    /// `call`; surfaced to the pipeline caller, never swallowed.
    pub fn resolve(&self, call: &str) -> Result<StepFn, PipelineError> {
        self.entries
            .get(call)
            .copied()
            .ok_or_else(|| PipelineError::UnknownStep {
                call: call.to_string(),
            })
    }

    /// Registered callable names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
