//! Atomic file writes.
//!
//! Report files are rewritten on every run; a crash mid-write must never
//! leave a truncated JSON document behind. Writes go to a temporary file in
//! the target directory, are fsynced, and then renamed over the target.

use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use tempfile::NamedTempFile;

/// Atomically write `content` to `path` (temp file + fsync + rename).
///
/// The parent directory is created when missing. The temporary file is
/// created in the target's directory so the final rename stays on one
/// filesystem.
///
/// # Errors
///
/// Returns the underlying I/O error from directory creation, the write, the
/// fsync, or the final rename.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let temp_dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(temp_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file
        .persist(path.as_std_path())
        .map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_write_creates_file_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("out.json")).unwrap();

        write_file_atomic(&path, "{\"ok\": true}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"ok\": true}");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("out.json")).unwrap();

        write_file_atomic(&path, "first").unwrap();
        write_file_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("nested/dir/out.json")).unwrap();

        write_file_atomic(&path, "content").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("out.json")).unwrap();

        write_file_atomic(&path, "content").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
