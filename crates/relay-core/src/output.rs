//! Output writer
//!
//! Persists the four stage outputs as numbered markdown files. Existing files
//! are overwritten as a set; the last run wins.

use crate::error::{RelayError, Result};
use crate::orchestration::{CompletedStages, Role};
use std::fs;
use std::path::{Path, PathBuf};

pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `role`'s output goes
    pub fn path_for(&self, role: Role) -> PathBuf {
        self.dir.join(role.file_name())
    }

    /// Ensure the output directory exists
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| RelayError::output(&self.dir, e))
    }

    /// Write every stage output verbatim, in stage order
    ///
    /// All four are staged to temp files first and only then renamed into
    /// place, so a failed write leaves the previous run's files untouched.
    pub fn write(&self, stages: &CompletedStages) -> Result<Vec<PathBuf>> {
        self.ensure_dir()?;

        let mut staged = Vec::with_capacity(Role::ALL.len());
        for (role, text) in stages.iter() {
            let temp = temp_path(&self.path_for(role));
            if let Err(e) = fs::write(&temp, text) {
                discard(&staged);
                return Err(RelayError::output(&temp, e));
            }
            staged.push((role, temp));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (role, temp) in &staged {
            let path = self.path_for(*role);
            fs::rename(temp, &path).map_err(|e| RelayError::output(&path, e))?;
            tracing::debug!(role = %role, path = %path.display(), "Wrote stage output");
            written.push(path);
        }

        Ok(written)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("md.tmp")
}

fn discard(staged: &[(Role, PathBuf)]) {
    for (_, temp) in staged {
        if let Err(e) = fs::remove_file(temp) {
            tracing::warn!("Failed to remove {}: {}", temp.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn stages(tag: &str) -> CompletedStages {
        CompletedStages {
            architect_design: format!("{tag} design"),
            data_implementation: format!("{tag} data"),
            ui_implementation: format!("{tag} ui"),
            final_output: format!("{tag} final"),
        }
    }

    #[test]
    fn test_writes_four_files() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().join(".codex-tasks").join("phase3-swarm"));

        let written = writer.write(&stages("run1")).unwrap();

        assert_eq!(written.len(), 4);
        assert_eq!(fs::read_dir(writer.dir()).unwrap().count(), 4);
        assert_eq!(
            fs::read_to_string(writer.path_for(Role::UiDeveloper)).unwrap(),
            "run1 ui"
        );
    }

    #[test]
    fn test_overwrites_previous_run() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path());

        writer.write(&stages("old")).unwrap();
        writer.write(&stages("new")).unwrap();

        for role in Role::ALL {
            let content = fs::read_to_string(writer.path_for(role)).unwrap();
            assert!(content.starts_with("new "), "{} kept stale content", role);
        }
    }

    #[test]
    fn test_failed_write_keeps_previous_set() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path());
        writer.write(&stages("old")).unwrap();

        // a directory squatting on the UI temp name makes the third write fail
        let blocker = temp_path(&writer.path_for(Role::UiDeveloper));
        fs::create_dir(&blocker).unwrap();

        let err = writer.write(&stages("new")).unwrap_err();
        assert!(matches!(err, RelayError::Output { .. }));

        for role in Role::ALL {
            let content = fs::read_to_string(writer.path_for(role)).unwrap();
            assert!(content.starts_with("old "), "{} was partly overwritten", role);
            assert!(!temp_path(&writer.path_for(role)).is_file());
        }
        // four outputs plus the blocker, no stray temp files
        assert_eq!(fs::read_dir(writer.dir()).unwrap().count(), 5);
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().join("out"));
        writer.ensure_dir().unwrap();
        writer.ensure_dir().unwrap();
        assert!(writer.dir().is_dir());
    }

    #[test]
    fn test_unwritable_dir_reports_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a dir").unwrap();

        let writer = OutputWriter::new(blocker.join("out"));
        let err = writer.write(&stages("x")).unwrap_err();
        assert!(matches!(err, RelayError::Output { ref path, .. } if path.contains("out")));
    }
}
