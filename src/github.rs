//! Minimal GitHub REST collaborators for review comments.
//!
//! Only the two calls revq needs: posting a review comment on a pull request
//! (issues endpoint, which covers PRs) and collapsing this tool's earlier
//! comments. Anything richer belongs to an external client.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;

/// Hidden marker embedded in every comment revq posts, so later runs can
/// recognize their own output.
pub const HTML_COMMENT_MARKER: &str = "<!-- revq-code-review -->";

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("revq/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IssueComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

/// Resolve a GitHub token: an explicit value wins, then `GITHUB_TOKEN`, then
/// `GH_TOKEN`.
#[must_use]
pub fn resolve_token(explicit: Option<String>) -> Option<String> {
    explicit
        .filter(|t| !t.is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .or_else(|| std::env::var("GH_TOKEN").ok())
}

/// Pull request number from the hosted runner's `GITHUB_REF`
/// (`refs/pull/<n>/merge`).
#[must_use]
pub fn pr_number_from_env() -> Option<u64> {
    pr_number_from_ref(&std::env::var("GITHUB_REF").ok()?)
}

fn pr_number_from_ref(github_ref: &str) -> Option<u64> {
    let rest = github_ref.strip_prefix("refs/pull/")?;
    let (number, _) = rest.split_once('/')?;
    number.parse().ok()
}

/// Post a comment to a pull request or issue.
///
/// `repository` is `owner/repo`. Succeeds on any 2xx response.
///
/// # Errors
///
/// Transport failures and non-2xx responses, carrying the status and the
/// response body.
pub fn post_comment(repository: &str, number: u64, token: &str, body: &str) -> Result<()> {
    let url = format!("{API_ROOT}/repos/{repository}/issues/{number}/comments");
    let client = client()?;
    let response = client
        .post(&url)
        .header("Authorization", format!("token {token}"))
        .header("Accept", "application/vnd.github+json")
        .json(&serde_json::json!({ "body": body }))
        .send()
        .with_context(|| format!("failed to reach {url}"))?;

    let status = response.status();
    if status.is_success() {
        info!(repository, number, "posted review comment");
        Ok(())
    } else {
        let detail = response.text().unwrap_or_default();
        bail!("failed to post comment to {repository}#{number}: {status} {detail}");
    }
}

/// Collapse revq's outdated review comments on a pull request.
///
/// Every earlier comment carrying [`HTML_COMMENT_MARKER`] except the newest
/// is wrapped in a `<details>` block. Comments already collapsed are left
/// alone. Returns how many comments were collapsed.
///
/// # Errors
///
/// Transport failures and non-2xx responses from the list or update calls.
pub fn collapse_outdated_comments(repository: &str, number: u64, token: &str) -> Result<usize> {
    let collapsed_title = "Outdated code review by revq";
    let collapsed_marker = format!("<summary>{collapsed_title}</summary>");

    let url = format!("{API_ROOT}/repos/{repository}/issues/{number}/comments?per_page=100");
    let client = client()?;
    let response = client
        .get(&url)
        .header("Authorization", format!("token {token}"))
        .header("Accept", "application/vnd.github+json")
        .send()
        .with_context(|| format!("failed to reach {url}"))?;
    let status = response.status();
    if !status.is_success() {
        let detail = response.text().unwrap_or_default();
        bail!("failed to list comments on {repository}#{number}: {status} {detail}");
    }
    let comments: Vec<IssueComment> = response
        .json()
        .context("failed to decode comment listing")?;

    let mut outdated: Vec<(u64, String)> = comments
        .into_iter()
        .filter_map(|comment| comment.body.map(|body| (comment.id, body)))
        .filter(|(_, body)| body.contains(HTML_COMMENT_MARKER) && !body.contains(&collapsed_marker))
        .collect();
    // The newest marker-bearing comment is the current review; keep it open.
    outdated.pop();

    if outdated.is_empty() {
        info!(repository, number, "no outdated review comments found");
        return Ok(0);
    }

    let collapsed = outdated.len();
    for (comment_id, body) in outdated {
        info!(comment_id, "collapsing outdated review comment");
        let new_body =
            format!("<details>\n<summary>{collapsed_title}</summary>\n\n{body}\n</details>");
        let url = format!("{API_ROOT}/repos/{repository}/issues/comments/{comment_id}");
        let response = client
            .patch(&url)
            .header("Authorization", format!("token {token}"))
            .header("Accept", "application/vnd.github+json")
            .json(&serde_json::json!({ "body": new_body }))
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            bail!("failed to update comment {comment_id}: {status} {detail}");
        }
    }
    info!(repository, number, collapsed, "collapsed outdated review comments");
    Ok(collapsed)
}

fn client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}
