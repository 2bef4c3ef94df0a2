//! Builtin pipeline steps and the registry they live in.
//!
//! Steps follow the engine contract: they read everything they need from the
//! [`PipelineContext`] and fail fast on missing inputs. Misconfiguration is
//! an error surfaced to the pipeline caller, never a silent skip.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::{Value, json};
use tracing::info;

use revq_pipeline::{PipelineContext, StepOutput, StepRegistry};

use crate::github;
use crate::trackers::{self, TrackerIssue};

const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// The registry of builtin steps, the default for `revq pipeline`.
#[must_use]
pub fn builtin_registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .register("post_github_comment", post_github_comment)
        .register("collapse_outdated_comments", collapse_outdated_comments)
        .register("fetch_linear_issue", fetch_linear_issue);
    registry
}

fn require_str(ctx: &PipelineContext, key: &str) -> Result<String> {
    ctx.value(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .with_context(|| format!("missing context value `{key}`"))
}

fn github_coordinates(ctx: &PipelineContext) -> Result<(String, u64, String)> {
    let repository = require_str(ctx, "github_repository")?;
    let token = require_str(ctx, "github_token")?;
    let number = ctx
        .value("pr_number")
        .and_then(Value::as_u64)
        .context("missing context value `pr_number`")?;
    Ok((repository, number, token))
}

/// Post the rendered review as a pull-request comment.
fn post_github_comment(ctx: &PipelineContext) -> Result<StepOutput> {
    let (repository, number, token) = github_coordinates(ctx)?;
    let markdown = require_str(ctx, "report_markdown")?;

    let body = format!("{markdown}\n\n{}", github::HTML_COMMENT_MARKER);
    github::post_comment(&repository, number, &token, &body)?;
    Ok(StepOutput::update("comment_posted", true))
}

/// Collapse this tool's earlier review comments on the pull request.
fn collapse_outdated_comments(ctx: &PipelineContext) -> Result<StepOutput> {
    let (repository, number, token) = github_coordinates(ctx)?;
    let collapsed = github::collapse_outdated_comments(&repository, number, &token)?;
    Ok(StepOutput::Value(json!(collapsed)))
}

/// Fetch the Linear issue referenced by the branch name and expose it as
/// `associated_issue`.
fn fetch_linear_issue(ctx: &PipelineContext) -> Result<StepOutput> {
    let api_key = require_str(ctx, "linear_api_key")?;
    let branch = match ctx.value("branch").and_then(Value::as_str) {
        Some(branch) => branch.to_string(),
        None => trackers::branch_from_env()
            .context("cannot determine the branch to extract an issue key from")?,
    };
    let issue_key = trackers::issue_key(&branch)
        .with_context(|| format!("no issue key found in branch name: {branch}"))?;

    info!(issue_key = issue_key.as_str(), "fetching Linear issue");
    let issue = linear_fetch(&issue_key, &api_key)?;
    Ok(StepOutput::Update(IndexMap::from([(
        "associated_issue".to_string(),
        serde_json::to_value(issue).context("failed to serialize tracker issue")?,
    )])))
}

fn linear_fetch(issue_key: &str, api_key: &str) -> Result<TrackerIssue> {
    let query = r"
    query GetIssue($id: String!) {
        issue(id: $id) {
            id
            identifier
            title
            description
            url
        }
    }
    ";

    let client = reqwest::blocking::Client::new();
    let response = client
        .post(LINEAR_API_URL)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&json!({
            "query": query,
            "variables": { "id": issue_key },
        }))
        .send()
        .context("failed to reach the Linear API")?;
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().unwrap_or_default();
        bail!("Linear API request failed: {status} {detail}");
    }

    let data: Value = response.json().context("failed to decode Linear response")?;
    if let Some(errors) = data.get("errors") {
        bail!("Linear API error: {errors}");
    }
    let issue = data
        .pointer("/data/issue")
        .filter(|issue| !issue.is_null())
        .with_context(|| format!("Linear issue {issue_key} not found"))?;

    Ok(TrackerIssue {
        title: issue
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: issue
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        url: issue
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = builtin_registry();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "collapse_outdated_comments",
                "fetch_linear_issue",
                "post_github_comment",
            ]
        );
    }

    #[test]
    fn test_post_comment_step_requires_coordinates() {
        let ctx = PipelineContext::new();
        let err = post_github_comment(&ctx).unwrap_err();
        assert!(err.to_string().contains("github_repository"));

        let mut ctx = PipelineContext::new();
        ctx.seed("github_repository", "owner/repo");
        ctx.seed("github_token", "tok");
        let err = post_github_comment(&ctx).unwrap_err();
        assert!(err.to_string().contains("pr_number"));
    }

    #[test]
    fn test_fetch_linear_issue_requires_api_key_and_branch() {
        let ctx = PipelineContext::new();
        let err = fetch_linear_issue(&ctx).unwrap_err();
        assert!(err.to_string().contains("linear_api_key"));

        let mut ctx = PipelineContext::new();
        ctx.seed("linear_api_key", "key");
        ctx.seed("branch", "no-issue-key-here");
        let err = fetch_linear_issue(&ctx).unwrap_err();
        assert!(err.to_string().contains("no issue key found"));
    }
}
