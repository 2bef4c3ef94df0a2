//! The pipeline engine: ordered, environment-filtered step execution over a
//! shared context.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::env::Environment;
use crate::registry::{StepOutput, StepRegistry};

/// Reserved context key holding the accumulated step outputs.
pub const OUTPUT_KEY: &str = "pipeline_out";

/// Shared state threaded through one pipeline run.
///
/// `values` holds caller-seeded inputs; `output` is the reserved
/// `pipeline_out` accumulator. Pre-seeding the accumulator is an explicit
/// feature supporting chained pipeline invocations: a run merges into
/// whatever is already present and never resets it. The context is
/// exclusively owned by a single [`Pipeline::run`] call for its duration.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    values: IndexMap<String, Value>,
    output: IndexMap<String, Value>,
}

impl PipelineContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a plain mapping. When the mapping carries the
    /// reserved `pipeline_out` key with an object value, that object becomes
    /// the pre-seeded accumulator.
    #[must_use]
    pub fn seeded(mut values: IndexMap<String, Value>) -> Self {
        let output = match values.shift_remove(OUTPUT_KEY) {
            Some(Value::Object(map)) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };
        Self { values, output }
    }

    /// Add or replace a seeded input value.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// A caller-seeded input value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// An entry produced by an earlier step in this run (or a chained one).
    ///
    /// Absence means the producing step did not run (skipped or never
    /// configured), not that it ran with an empty result.
    #[must_use]
    pub fn produced(&self, key: &str) -> Option<&Value> {
        self.output.get(key)
    }

    /// The full accumulated `pipeline_out` mapping.
    #[must_use]
    pub fn outputs(&self) -> &IndexMap<String, Value> {
        &self.output
    }
}

/// One named unit of work resolved to a callable at execution time.
///
/// `envs` defaults to every recognized environment ([`Environment::all`], a
/// computed default), so un-customized steps stay eligible when a new
/// environment variant is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    /// Registry key of the callable to invoke; resolved lazily at run time,
    /// so an unresolvable reference fails only when this step actually runs.
    pub call: String,
    /// Environments this step is eligible to run in. Empty also means
    /// "everywhere".
    #[serde(default = "Environment::all")]
    pub envs: Vec<Environment>,
}

impl PipelineStep {
    /// A step eligible in every environment.
    #[must_use]
    pub fn new(call: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            envs: Environment::all(),
        }
    }

    /// A step eligible only in the given environments.
    #[must_use]
    pub fn scoped(call: impl Into<String>, envs: Vec<Environment>) -> Self {
        Self {
            call: call.into(),
            envs,
        }
    }

    #[must_use]
    pub fn eligible_in(&self, env: Environment) -> bool {
        self.envs.is_empty() || self.envs.contains(&env)
    }

    /// Resolve `call` in `registry` and invoke it with the accumulated
    /// context.
    ///
    /// # Errors
    ///
    /// Resolution failure surfaces as
    /// [`revq_utils::error::PipelineError::UnknownStep`]; any error from the
    /// callable itself is passed through untouched.
    pub fn run(
        &self,
        registry: &StepRegistry,
        ctx: &PipelineContext,
    ) -> anyhow::Result<StepOutput> {
        let call = registry.resolve(&self.call)?;
        call(ctx)
    }
}

/// An ordered, environment-filtered sequence of steps sharing one context.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub ctx: PipelineContext,
    /// Step name to step, iterated in insertion order. Never reordered.
    pub steps: IndexMap<String, PipelineStep>,
}

impl Pipeline {
    #[must_use]
    pub fn new(ctx: PipelineContext, steps: IndexMap<String, PipelineStep>) -> Self {
        Self { ctx, steps }
    }

    /// Execute the pipeline in the detected current environment.
    ///
    /// # Errors
    ///
    /// See [`Self::run_in`].
    pub fn run(&mut self, registry: &StepRegistry) -> anyhow::Result<IndexMap<String, Value>> {
        self.run_in(Environment::current(), registry)
    }

    /// Execute the pipeline as if running in `env`.
    ///
    /// Steps run strictly sequentially in configuration order. An eligible
    /// step's raw output is recorded under its name in `pipeline_out`;
    /// structured updates are additionally flattened into the same mapping.
    /// An ineligible step is skipped without leaving an entry. Returns the
    /// full accumulated `pipeline_out` mapping.
    ///
    /// # Errors
    ///
    /// The first resolution or invocation error aborts the run. There is no
    /// retry and no rollback: outputs of already-completed steps remain
    /// visible on `self.ctx`.
    pub fn run_in(
        &mut self,
        env: Environment,
        registry: &StepRegistry,
    ) -> anyhow::Result<IndexMap<String, Value>> {
        info!(env = env.as_str(), "running pipeline");
        for (name, step) in &self.steps {
            if !step.eligible_in(env) {
                info!(
                    step = name.as_str(),
                    env = env.as_str(),
                    "skipping pipeline step: not eligible in this environment"
                );
                continue;
            }
            info!(step = name.as_str(), "running pipeline step");
            match step.run(registry, &self.ctx)? {
                StepOutput::Update(map) => {
                    for (key, value) in &map {
                        self.ctx.output.insert(key.clone(), value.clone());
                    }
                    let raw = Value::Object(map.into_iter().collect());
                    self.ctx.output.insert(name.clone(), raw);
                }
                StepOutput::Value(value) => {
                    self.ctx.output.insert(name.clone(), value);
                }
            }
        }
        Ok(self.ctx.output.clone())
    }
}
