//! Report data structures and ingestion.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use revq_utils::error::ReportError;
use revq_utils::syntax::syntax_hint;

const fn default_scale() -> u8 {
    1
}

/// A single line-range annotation with a suggested fix, owned by an [`Issue`].
///
/// Created only during report ingestion and immutable afterwards. A raw
/// sub-entry may omit `file`; normalization fills it from the parent issue,
/// so an `AffectedCode` never survives ingestion without a resolvable file
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedCode {
    /// Owning file path. Inherited from the parent issue when the raw entry
    /// omits it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// First affected line (1-based).
    pub start_line: u32,
    /// Last affected line, >= `start_line`.
    pub end_line: u32,
    /// Free-text suggested fix.
    #[serde(default)]
    pub proposal: String,
    /// Snippet of the affected source text.
    #[serde(default)]
    pub affected_code: String,
}

impl AffectedCode {
    /// Syntax highlighting hint derived from the file extension.
    #[must_use]
    pub fn syntax_hint(&self) -> String {
        syntax_hint(&self.file)
    }
}

/// One reviewer-identified finding tied to a specific file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Sequential id, unique within a report, assigned in discovery order.
    /// Persisted for reference but reassigned deterministically on load.
    #[serde(default)]
    pub id: u32,
    pub title: String,
    /// Multi-line description of the finding.
    #[serde(default)]
    pub details: String,
    /// Classification tags; order is irrelevant.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Severity on a small positive scale (1 = minor).
    #[serde(default = "default_scale")]
    pub severity: u8,
    /// Reviewer confidence on a small positive scale.
    #[serde(default = "default_scale")]
    pub confidence: u8,
    /// Owning file path, stamped from the report mapping key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// Affected line ranges in discovery order.
    #[serde(default)]
    pub affected_lines: Vec<AffectedCode>,
}

impl Issue {
    /// Syntax highlighting hint for the issue's own file.
    #[must_use]
    pub fn syntax_hint(&self) -> String {
        syntax_hint(&self.file)
    }
}

/// The aggregate of all issues for one review run plus summary metadata.
///
/// `issues` maps file path to that file's findings; insertion order is file
/// discovery order and is preserved through serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub issues: IndexMap<String, Vec<Issue>>,
    /// Free text produced by a separate summarization step.
    #[serde(default)]
    pub summary: String,
    /// How many files the review processed, independent of how many contain
    /// issues.
    #[serde(default)]
    pub number_of_processed_files: u32,
}

impl Report {
    /// Ingest raw per-file findings, the sole entry point for external LLM
    /// output.
    ///
    /// Every entry must deserialize into an [`Issue`]; ids are then assigned
    /// sequentially from 1 in file-insertion-then-entry order and file paths
    /// are propagated down to affected-code entries.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ReportError::MalformedIssue`] naming the offending
    /// file and field when an entry is missing required fields or carries
    /// values of the wrong shape. Nothing is partially ingested.
    pub fn from_raw(raw: IndexMap<String, Vec<serde_json::Value>>) -> Result<Self, ReportError> {
        let mut issues: IndexMap<String, Vec<Issue>> = IndexMap::with_capacity(raw.len());
        for (file, entries) in raw {
            let mut typed = Vec::with_capacity(entries.len());
            for entry in entries {
                let issue: Issue =
                    serde_json::from_value(entry).map_err(|e| ReportError::MalformedIssue {
                        file: file.clone(),
                        reason: e.to_string(),
                    })?;
                typed.push(issue);
            }
            issues.insert(file, typed);
        }

        let mut report = Self {
            issues,
            ..Self::default()
        };
        report.normalize();
        Ok(report)
    }

    /// Re-establish the structural invariants: sequential ids in
    /// file-insertion-then-entry order, issue files stamped from the mapping
    /// key, and affected-code files inherited from their parent.
    ///
    /// Deterministic: the same mapping always yields the same assignment,
    /// which is what makes the save/load round trip hold.
    pub(crate) fn normalize(&mut self) {
        let mut next_id: u32 = 1;
        for (file, entries) in &mut self.issues {
            for issue in entries {
                issue.id = next_id;
                next_id += 1;
                issue.file.clone_from(file);
                for line in &mut issue.affected_lines {
                    if line.file.is_empty() {
                        line.file.clone_from(&issue.file);
                    }
                }
            }
        }
    }

    /// All issues flattened across files, preserving file order then per-file
    /// order. Ids are exactly `1..=total_issues()` in this ordering.
    #[must_use]
    pub fn plain_issues(&self) -> Vec<&Issue> {
        self.issues.values().flatten().collect()
    }

    /// Total number of issues across all files.
    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Look up an issue by its sequential id.
    #[must_use]
    pub fn issue_by_id(&self, id: u32) -> Option<&Issue> {
        self.issues.values().flatten().find(|issue| issue.id == id)
    }
}
