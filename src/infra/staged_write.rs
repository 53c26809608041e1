// ============================================================
// Layer 6 — Staged Writer
// ============================================================
// Writes a batch of output files so a run leaves either every
// file or none:
//
//   1. stage    — each file goes to a temporary file in its
//                 target directory, fully written and synced
//   2. commit   — each temporary file is renamed over its target
//
// A failure while staging touches no target; the temporary
// files are deleted when dropped. A failure while committing
// removes the targets already renamed in this batch.

use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::error::ConvertError;

/// One file of a batch: where it goes and what it holds.
#[derive(Debug, Clone, Copy)]
pub struct Output<'a> {
    pub path:     &'a Path,
    pub contents: &'a str,
}

impl<'a> Output<'a> {
    pub fn new(path: &'a Path, contents: &'a str) -> Self {
        Self { path, contents }
    }
}

/// Write every output, or none of them.
pub fn write_all(outputs: &[Output<'_>]) -> Result<(), ConvertError> {
    let mut staged = Vec::with_capacity(outputs.len());
    for output in outputs {
        let tmp = stage(output).map_err(|e| ConvertError::io(output.path, e))?;
        staged.push((tmp, output.path));
    }

    let mut committed: Vec<&Path> = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        if let Err(e) = tmp.persist(path) {
            for done in &committed {
                if let Err(rm) = fs::remove_file(done) {
                    tracing::warn!("Could not remove '{}': {rm}", done.display());
                }
            }
            return Err(ConvertError::io(path, e.error));
        }
        tracing::debug!("Wrote '{}'", path.display());
        committed.push(path);
    }

    Ok(())
}

fn stage(output: &Output<'_>) -> io::Result<NamedTempFile> {
    let dir = match output.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(output.contents.as_bytes())?;
    tmp.as_file().sync_all()?;

    // NamedTempFile is created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    Ok(tmp)
}

// ─── Unit Tests ───────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_all_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a   = dir.path().join("a.pat");
        let b   = dir.path().join("b.json");

        write_all(&[Output::new(&a, "alpha"), Output::new(&b, "{}")]).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(&b).unwrap(), "{}");
        assert_eq!(entries(dir.path()), vec!["a.pat", "b.json"]);
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let a   = dir.path().join("a.pat");
        fs::write(&a, "old").unwrap();

        write_all(&[Output::new(&a, "new")]).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "new");
    }

    #[test]
    fn test_failed_staging_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ok  = dir.path().join("ok.pat");
        let bad = dir.path().join("missing").join("bad.pat");

        let err = write_all(&[Output::new(&ok, "x"), Output::new(&bad, "y")]).unwrap_err();

        assert!(err.to_string().contains("bad.pat"));
        assert!(!ok.exists());
        assert!(entries(dir.path()).is_empty(), "no temporary files left behind");
    }

    #[test]
    fn test_failed_staging_keeps_files_from_earlier_run() {
        let dir = tempfile::tempdir().unwrap();
        let ok  = dir.path().join("ok.pat");
        let bad = dir.path().join("missing").join("bad.pat");
        fs::write(&ok, "earlier run").unwrap();

        assert!(write_all(&[Output::new(&ok, "this run"), Output::new(&bad, "y")]).is_err());

        assert_eq!(fs::read_to_string(&ok).unwrap(), "earlier run");
    }

    #[test]
    fn test_failed_commit_removes_committed_files() {
        let dir   = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.pat");
        // A directory cannot be replaced by a file
        let taken = dir.path().join("taken");
        fs::create_dir(&taken).unwrap();

        let err = write_all(&[Output::new(&first, "x"), Output::new(&taken, "y")]).unwrap_err();

        assert!(err.to_string().contains("taken"));
        assert!(!first.exists());
        assert_eq!(entries(dir.path()), vec!["taken"]);
    }
}
