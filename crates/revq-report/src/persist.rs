//! Report persistence: JSON save/load with the round-trip contract.

use camino::{Utf8Path, Utf8PathBuf};

use revq_utils::atomic_write::write_file_atomic;
use revq_utils::error::ReportError;

use crate::model::Report;

impl Report {
    /// File name used when no explicit report path is given.
    pub const DEFAULT_FILE_NAME: &'static str = "code-review-report.json";

    /// Default report location: [`Self::DEFAULT_FILE_NAME`] in the working
    /// directory.
    #[must_use]
    pub fn default_path() -> Utf8PathBuf {
        Utf8PathBuf::from(Self::DEFAULT_FILE_NAME)
    }

    /// Persist the report as pretty-printed JSON.
    ///
    /// The full issue tree is written, including assigned ids and
    /// affected-code line ranges, plus the summary and processed-file count.
    /// The write is atomic (temp file + rename).
    ///
    /// # Errors
    ///
    /// [`ReportError::WriteFailed`] on any underlying I/O failure.
    pub fn save(&self, path: &Utf8Path) -> Result<(), ReportError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ReportError::InvalidJson {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        write_file_atomic(path, &json).map_err(|e| ReportError::WriteFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a report from `path` and re-establish its invariants.
    ///
    /// Ids stored in the file are not trusted; they are reassigned
    /// deterministically, so a reloaded report reproduces the exact
    /// `plain_issues` ordering and ids of the report that was saved.
    ///
    /// # Errors
    ///
    /// [`ReportError::ReadFailed`] when the file cannot be read,
    /// [`ReportError::InvalidJson`] when its content does not parse.
    pub fn load(path: &Utf8Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let mut report: Self =
            serde_json::from_str(&content).map_err(|e| ReportError::InvalidJson {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        report.normalize();
        Ok(report)
    }

    /// Load the report from the default discovered location.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::load`].
    pub fn load_default() -> Result<Self, ReportError> {
        Self::load(&Self::default_path())
    }
}
