//! Project configuration for revq.
//!
//! Configuration is layered: built-in defaults (compiled in from
//! `defaults.toml`) are overlaid by a repository-local `.revq.toml`, or by an
//! explicit file passed on the command line. Scalar values replace,
//! `prompt_vars` merge by union, and pipeline step tables replace per name.

use std::collections::BTreeMap;

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Deserialize;

use revq_pipeline::PipelineStep;
use revq_utils::error::ConfigError;

const DEFAULTS: &str = include_str!("defaults.toml");

/// Effective project configuration after layering.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Per-file review prompt handed to the LLM collaborator (opaque here).
    pub prompt: String,
    /// Prompt used by the separate summarization step (opaque here).
    pub summary_prompt: String,
    /// Retry budget for LLM collaborator calls.
    pub retries: u32,
    /// Upper bound on code tokens per review request.
    pub max_code_tokens: u32,
    /// Substitution variables merged into prompts.
    pub prompt_vars: BTreeMap<String, String>,
    /// Comment fragments that trigger a reaction when mentioned on a PR.
    pub mention_triggers: Vec<String>,
    /// Configured pipeline steps, in file order.
    pub pipeline: IndexMap<String, PipelineStep>,
}

/// One configuration layer as it appears on disk. Every field is optional;
/// unknown keys are rejected so typos fail loudly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    prompt: Option<String>,
    summary_prompt: Option<String>,
    retries: Option<u32>,
    max_code_tokens: Option<u32>,
    #[serde(default)]
    prompt_vars: BTreeMap<String, String>,
    mention_triggers: Option<Vec<String>>,
    #[serde(default)]
    pipeline: IndexMap<String, PipelineStep>,
}

impl ProjectConfig {
    /// Repository-local configuration file name.
    pub const FILE_NAME: &'static str = ".revq.toml";

    /// Load the effective configuration.
    ///
    /// With `custom_config_file` set, that file is required and overlays the
    /// defaults. Otherwise `.revq.toml` in the working directory overlays
    /// them when present, and its absence is not an error.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when an explicit file is missing;
    /// [`ConfigError::InvalidFile`] when a layer fails to parse.
    pub fn load(custom_config_file: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let mut config = Self::builtin()?;

        let layer = match custom_config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound {
                        path: path.to_string(),
                    });
                }
                Some(path.to_owned())
            }
            None => {
                let local = Utf8Path::new(Self::FILE_NAME);
                local.is_file().then(|| local.to_owned())
            }
        };

        if let Some(path) = layer {
            let content =
                std::fs::read_to_string(&path).map_err(|e| ConfigError::InvalidFile {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
            let partial = Self::parse_layer(&content, path.as_str())?;
            config.apply(partial);
        }

        Ok(config)
    }

    /// The built-in defaults with no repository overlay.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFile`] when the compiled-in defaults fail to
    /// parse.
    pub fn builtin() -> Result<Self, ConfigError> {
        let partial = Self::parse_layer(DEFAULTS, "<builtin defaults>")?;
        let mut config = Self {
            prompt: String::new(),
            summary_prompt: String::new(),
            retries: 3,
            max_code_tokens: 32_000,
            prompt_vars: BTreeMap::new(),
            mention_triggers: Vec::new(),
            pipeline: IndexMap::new(),
        };
        config.apply(partial);
        Ok(config)
    }

    fn parse_layer(content: &str, origin: &str) -> Result<PartialConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFile {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    fn apply(&mut self, layer: PartialConfig) {
        if let Some(prompt) = layer.prompt {
            self.prompt = prompt;
        }
        if let Some(summary_prompt) = layer.summary_prompt {
            self.summary_prompt = summary_prompt;
        }
        if let Some(retries) = layer.retries {
            self.retries = retries;
        }
        if let Some(max_code_tokens) = layer.max_code_tokens {
            self.max_code_tokens = max_code_tokens;
        }
        self.prompt_vars.extend(layer.prompt_vars);
        if let Some(mention_triggers) = layer.mention_triggers {
            self.mention_triggers = mention_triggers;
        }
        for (name, step) in layer.pipeline {
            self.pipeline.insert(name, step);
        }
    }
}
