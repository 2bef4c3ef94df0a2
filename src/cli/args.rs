//! CLI argument definitions and parsing structures.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// revq - AI-assisted code review reports and pipeline automation
#[derive(Parser)]
#[command(name = "revq")]
#[command(about = "Render AI code review reports and run follow-up pipeline steps")]
#[command(long_about = r#"
revq ingests per-file review findings produced by an LLM collaborator,
normalizes them into a structured report, renders the report for terminals or
as Markdown, and runs an environment-filtered pipeline of follow-up steps
(posting PR comments, fetching tracker issues).

EXAMPLES:
  # Render the stored report for the terminal
  revq render

  # Render a specific report file as Markdown
  revq render --report artifact/code-review-report.json --format markdown

  # Run the configured pipeline steps against the stored report
  revq pipeline

CONFIGURATION:
  Defaults are built in; a repository-local .revq.toml overlays them.
  Use --config to point at an explicit configuration file instead.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides .revq.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a stored report
    Render {
        /// Report file to load (defaults to ./code-review-report.json)
        #[arg(long)]
        report: Option<Utf8PathBuf>,

        /// Output format: cli or markdown
        #[arg(long, default_value = "cli")]
        format: String,
    },

    /// Run the configured pipeline steps against a stored report
    Pipeline {
        /// Report file to load (defaults to ./code-review-report.json)
        #[arg(long)]
        report: Option<Utf8PathBuf>,
    },
}
