//! Command dispatch for the revq CLI.

use anyhow::Result;
use camino::Utf8Path;
use clap::Parser;
use tracing::info;

use revq_config::ProjectConfig;
use revq_pipeline::{Pipeline, PipelineContext};
use revq_report::{Report, ReportFormat};
use revq_utils::error::{ConfigError, ReportError, RevqError};

use crate::cli::args::{Cli, Commands};
use crate::{github, steps, trackers};

/// Parse arguments, execute, and map failures to a process exit code.
///
/// All output, including error reporting, happens here; `main` only exits.
///
/// # Errors
///
/// The exit code to terminate with: 2 for configuration and format-selection
/// mistakes, 1 for everything else.
pub fn run() -> Result<(), i32> {
    let cli = Cli::parse();

    if let Err(e) = revq_utils::logging::init_tracing(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    match execute(&cli) {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("error: {err:#}");
            Err(exit_code(&err))
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render { report, format } => {
            let format: ReportFormat = format.parse().map_err(RevqError::Report)?;
            let report = load_report(report.as_deref())?;
            print!("{}", report.render(format));
            Ok(())
        }
        Commands::Pipeline { report } => run_pipeline(cli, report.as_deref()),
    }
}

fn load_report(path: Option<&Utf8Path>) -> Result<Report> {
    let report = match path {
        Some(path) => Report::load(path)?,
        None => Report::load_default()?,
    };
    Ok(report)
}

fn run_pipeline(cli: &Cli, report_path: Option<&Utf8Path>) -> Result<()> {
    let config = ProjectConfig::load(cli.config.as_deref()).map_err(RevqError::Config)?;
    if config.pipeline.is_empty() {
        info!("no pipeline steps configured");
        return Ok(());
    }

    let report = load_report(report_path)?;

    let mut ctx = PipelineContext::new();
    ctx.seed("report", serde_json::to_value(&report)?);
    ctx.seed("report_markdown", report.render(ReportFormat::Markdown));
    if let Ok(repository) = std::env::var("GITHUB_REPOSITORY") {
        ctx.seed("github_repository", repository);
    }
    if let Some(token) = github::resolve_token(None) {
        ctx.seed("github_token", token);
    }
    if let Some(number) = github::pr_number_from_env() {
        ctx.seed("pr_number", number);
    }
    if let Ok(api_key) = std::env::var("LINEAR_API_KEY") {
        ctx.seed("linear_api_key", api_key);
    }
    if let Some(branch) = trackers::branch_from_env() {
        ctx.seed("branch", branch);
    }

    let mut pipeline = Pipeline::new(ctx, config.pipeline.clone());
    let outputs = pipeline.run(&steps::builtin_registry())?;
    info!(outputs = outputs.len(), "pipeline finished");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(revq_err) = err.downcast_ref::<RevqError>() {
        return revq_err.to_exit_code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    if let Some(ReportError::UnsupportedFormat { .. }) = err.downcast_ref::<ReportError>() {
        return 2;
    }
    1
}
