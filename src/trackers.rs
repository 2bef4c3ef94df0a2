//! Issue-tracker helpers: key extraction and the issue value type.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default bounds on the project-prefix length of an issue key.
const KEY_MIN_LEN: usize = 2;
const KEY_MAX_LEN: usize = 10;

/// An issue fetched from a tracker, carried through the pipeline context as
/// the `associated_issue` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerIssue {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// Extract the first tracker issue key (`ABC-123` style) from a branch name.
///
/// The project prefix must start with an uppercase letter and be between
/// `min_len` and `max_len` characters. Returns `None` when nothing matches
/// or the bounds are degenerate.
#[must_use]
pub fn extract_issue_key(branch_name: &str, min_len: usize, max_len: usize) -> Option<String> {
    if min_len == 0 || max_len < min_len {
        return None;
    }
    let pattern = format!(r"\b[A-Z][A-Z0-9]{{{},{}}}-\d+\b", min_len - 1, max_len - 1);
    let re = Regex::new(&pattern).ok()?;
    re.find(branch_name).map(|m| m.as_str().to_string())
}

/// [`extract_issue_key`] with the default prefix bounds.
#[must_use]
pub fn issue_key(branch_name: &str) -> Option<String> {
    extract_issue_key(branch_name, KEY_MIN_LEN, KEY_MAX_LEN)
}

/// Resolve the branch under review from the CI environment.
///
/// `GITHUB_HEAD_REF` is set for pull-request workflows; push workflows carry
/// the branch in `GITHUB_REF` as `refs/heads/<branch>`. Local git branch
/// resolution is the job of an external git collaborator, not this module.
#[must_use]
pub fn branch_from_env() -> Option<String> {
    if let Ok(head_ref) = std::env::var("GITHUB_HEAD_REF")
        && !head_ref.is_empty()
    {
        return Some(head_ref);
    }
    let github_ref = std::env::var("GITHUB_REF").ok()?;
    github_ref
        .strip_prefix("refs/heads/")
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_key_from_branch() {
        assert_eq!(
            issue_key("feature/ABC-123-add-login"),
            Some("ABC-123".to_string())
        );
        assert_eq!(issue_key("GH-7"), Some("GH-7".to_string()));
        // The first match wins.
        assert_eq!(
            issue_key("fix/PROJ42-99-and-ABC-1"),
            Some("PROJ42-99".to_string())
        );
    }

    #[test]
    fn test_no_key_in_branch() {
        assert_eq!(issue_key("main"), None);
        assert_eq!(issue_key("feature/add-login"), None);
        // Lowercase prefixes are not issue keys.
        assert_eq!(issue_key("abc-123"), None);
    }

    #[test]
    fn test_prefix_length_bounds() {
        // Single-letter prefix needs min_len 1.
        assert_eq!(issue_key("X-1"), None);
        assert_eq!(extract_issue_key("X-1", 1, 10), Some("X-1".to_string()));
        // Degenerate bounds match nothing.
        assert_eq!(extract_issue_key("ABC-123", 0, 10), None);
        assert_eq!(extract_issue_key("ABC-123", 5, 2), None);
    }

    #[test]
    fn test_tracker_issue_serde_round_trip() {
        let issue = TrackerIssue {
            title: "Add login".to_string(),
            description: "Details".to_string(),
            url: "https://tracker.example/ABC-123".to_string(),
        };
        let value = serde_json::to_value(&issue).unwrap();
        let back: TrackerIssue = serde_json::from_value(value).unwrap();
        assert_eq!(back, issue);
    }
}
