// ============================================================
// Layer 6 — Output File Naming
// ============================================================
// With no test split the destination path is used as given.
// Otherwise it is a base name and each subset gets a suffix:
//
//   data/iris.pat → data/iris-train.pat
//                   data/iris-valid.pat
//                   data/iris-test.pat

use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "patterns";
const DEFAULT_EXT:  &str = "pat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub train:      PathBuf,
    pub validation: PathBuf,
    pub test:       PathBuf,
}

pub fn split_paths(base: &Path) -> SplitPaths {
    SplitPaths {
        train:      with_suffix(base, "train"),
        validation: with_suffix(base, "valid"),
        test:       with_suffix(base, "test"),
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_STEM);
    let ext = base
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(DEFAULT_EXT);
    base.with_file_name(format!("{stem}-{suffix}.{ext}"))
}
