// ============================================================
// Layer 6 — Conversion Report Store
// ============================================================
// Renders the ConversionReport of a run as pretty JSON so the
// encoding (which bit means which nominal value, how many rows
// were dropped, which files were written) can be looked up
// after the fact. The JSON is written in the same staged batch
// as the pattern files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::report::ConversionReport;

pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, report: &ConversionReport) -> Result<String> {
        serde_json::to_string_pretty(report)
            .with_context(|| format!("Cannot serialize report for '{}'", self.path.display()))
    }

    #[cfg(test)]
    pub fn load(&self) -> Result<ConversionReport> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read report from '{}'", self.path.display()))?;

        Ok(serde_json::from_str(&json)?)
    }
}
