//! Report rendering to terminal text and Markdown.

use std::fmt;
use std::str::FromStr;

use revq_utils::error::ReportError;

use crate::model::{Issue, Report};

/// Recognized rendering formats.
///
/// Callers request a format by name; unrecognized names fail at parse time
/// with [`ReportError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text layout for terminals.
    Cli,
    /// Self-contained Markdown document (PR comments, artifacts).
    Markdown,
}

impl ReportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cli" | "text" => Ok(Self::Cli),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(ReportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl Report {
    /// Render the report in the requested format.
    ///
    /// Pure: reads the issue tree, summary, and counters and returns a
    /// self-contained string; the report is never mutated. Identical
    /// underlying JSON yields byte-identical output for a given format,
    /// regardless of which loading path produced the report.
    #[must_use]
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Cli => self.render_cli(),
            ReportFormat::Markdown => self.render_markdown(),
        }
    }

    fn render_cli(&self) -> String {
        let mut out = String::new();
        out.push_str("CODE REVIEW REPORT\n");
        out.push_str("==================\n\n");

        if !self.summary.is_empty() {
            out.push_str(&self.summary);
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "{} issue(s) found across {} processed file(s).\n",
            self.total_issues(),
            self.number_of_processed_files
        ));

        for (file, issues) in &self.issues {
            for issue in issues {
                out.push('\n');
                out.push_str(&issue_heading_cli(issue));
                if !issue.tags.is_empty() {
                    let tags: Vec<&str> = issue.tags.iter().map(String::as_str).collect();
                    out.push_str(&format!("tags: {}\n", tags.join(", ")));
                }
                out.push_str(&format!("file: {file}\n"));
                if !issue.details.is_empty() {
                    out.push_str(&issue.details);
                    out.push('\n');
                }
                for line in &issue.affected_lines {
                    out.push_str(&format!(
                        "\n{}:{}-{}\n",
                        line.file, line.start_line, line.end_line
                    ));
                    if !line.affected_code.is_empty() {
                        out.push_str(&line.affected_code);
                        out.push('\n');
                    }
                    if !line.proposal.is_empty() {
                        out.push_str("proposed fix:\n");
                        out.push_str(&line.proposal);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Code Review\n\n");

        if !self.summary.is_empty() {
            out.push_str(&self.summary);
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "**{} issue(s) found across {} processed file(s)**\n",
            self.total_issues(),
            self.number_of_processed_files
        ));

        for (file, issues) in &self.issues {
            out.push_str(&format!("\n## `{file}`\n"));
            for issue in issues {
                out.push_str(&format!("\n### {}. {}\n\n", issue.id, issue.title));
                out.push_str(&format!(
                    "`severity {}/5` `confidence {}/5`",
                    issue.severity, issue.confidence
                ));
                for tag in &issue.tags {
                    out.push_str(&format!(" `{tag}`"));
                }
                out.push('\n');
                if !issue.details.is_empty() {
                    out.push('\n');
                    out.push_str(&issue.details);
                    out.push('\n');
                }
                for line in &issue.affected_lines {
                    let hint = line.syntax_hint();
                    out.push_str(&format!(
                        "\nLines {}-{} of `{}`:\n\n",
                        line.start_line, line.end_line, line.file
                    ));
                    if !line.affected_code.is_empty() {
                        out.push_str(&format!("```{hint}\n{}\n```\n", line.affected_code));
                    }
                    if !line.proposal.is_empty() {
                        out.push_str(&format!(
                            "\n**Proposed change:**\n\n```{hint}\n{}\n```\n",
                            line.proposal
                        ));
                    }
                }
            }
        }
        out
    }
}

fn issue_heading_cli(issue: &Issue) -> String {
    format!(
        "[{}] {} (severity {}/5, confidence {}/5)\n",
        issue.id, issue.title, issue.severity, issue.confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn sample_report() -> Report {
        let mut raw = IndexMap::new();
        raw.insert(
            "src/app.py".to_string(),
            vec![json!({
                "title": "Unchecked input",
                "details": "User input flows into eval\nwithout sanitization",
                "tags": ["security"],
                "severity": 4,
                "confidence": 5,
                "affected_lines": [{
                    "start_line": 10,
                    "end_line": 12,
                    "proposal": "use ast.literal_eval",
                    "affected_code": "eval(data)",
                }],
            })],
        );
        let mut report = Report::from_raw(raw).unwrap();
        report.summary = "One finding overall.".to_string();
        report.number_of_processed_files = 3;
        report
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("cli".parse::<ReportFormat>().unwrap(), ReportFormat::Cli);
        assert_eq!("CLI".parse::<ReportFormat>().unwrap(), ReportFormat::Cli);
        assert_eq!(
            "markdown".parse::<ReportFormat>().unwrap(),
            ReportFormat::Markdown
        );
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);

        let err = "yaml".parse::<ReportFormat>().unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnsupportedFormat { format } if format == "yaml"
        ));
    }

    #[test]
    fn test_cli_render_contains_all_parts() {
        let out = sample_report().render(ReportFormat::Cli);
        assert!(out.contains("[1] Unchecked input"));
        assert!(out.contains("severity 4/5"));
        assert!(out.contains("tags: security"));
        assert!(out.contains("file: src/app.py"));
        assert!(out.contains("User input flows into eval\nwithout sanitization"));
        assert!(out.contains("src/app.py:10-12"));
        assert!(out.contains("eval(data)"));
        assert!(out.contains("use ast.literal_eval"));
        assert!(out.contains("One finding overall."));
        assert!(out.contains("1 issue(s) found across 3 processed file(s)."));
    }

    #[test]
    fn test_markdown_render_uses_syntax_hint_fences() {
        let out = sample_report().render(ReportFormat::Markdown);
        assert!(out.starts_with("# Code Review\n"));
        assert!(out.contains("## `src/app.py`"));
        assert!(out.contains("### 1. Unchecked input"));
        assert!(out.contains("```python\neval(data)\n```"));
        assert!(out.contains("**Proposed change:**"));
        assert!(out.contains("```python\nuse ast.literal_eval\n```"));
    }

    #[test]
    fn test_render_is_pure() {
        let report = sample_report();
        let before = report.clone();
        let first = report.render(ReportFormat::Markdown);
        let second = report.render(ReportFormat::Markdown);
        assert_eq!(first, second);
        assert_eq!(report, before);
    }
}
