// ============================================================
// Layer 6 — PAT Serializer
// ============================================================
// Writes encoded rows in the SNNS / JavaNNS pattern format:
//
//   SNNS pattern definition file V3.2
//   generated at Mon Oct 19 14:02:11 2026
//
//   No. of patterns : 3
//   No. of input units : 4
//   No. of output units : 2
//
//   72 1 0 0 1 0
//   ...
//
// Each pattern is one line: input units first, then output
// units, space separated, in the order the rows were given.
//
// Values print in plain decimal, switching to exponent form
// outside [1e-4, 1e15) so 1e300 stays "1e300".
//
// Files are rendered fully in memory; staged_write puts them
// on disk.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::dataset::EncodedRow;

pub const PAT_HEADER: &str = "SNNS pattern definition file V3.2";

/// How an encoded row divides into input and output units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatLayout {
    pub inputs:  usize,
    pub outputs: usize,
}

impl PatLayout {
    pub fn width(&self) -> usize {
        self.inputs + self.outputs
    }
}

/// A pattern file ready to be written.
#[derive(Debug, Clone)]
pub struct PatFile {
    pub path:     PathBuf,
    pub patterns: usize,
    contents:     String,
}

impl PatFile {
    pub fn new(
        path:         impl Into<PathBuf>,
        rows:         &[&EncodedRow],
        layout:       PatLayout,
        generated_at: &str,
    ) -> Self {
        Self {
            path:     path.into(),
            patterns: rows.len(),
            contents: render(rows, layout, generated_at),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Render rows as PAT text.
pub fn render(rows: &[&EncodedRow], layout: PatLayout, generated_at: &str) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{PAT_HEADER}");
    let _ = writeln!(out, "generated at {generated_at}");
    let _ = writeln!(out);
    let _ = writeln!(out, "No. of patterns : {}", rows.len());
    let _ = writeln!(out, "No. of input units : {}", layout.inputs);
    let _ = writeln!(out, "No. of output units : {}", layout.outputs);
    let _ = writeln!(out);

    for row in rows {
        debug_assert_eq!(row.values.len(), layout.width());
        let line = row
            .values
            .iter()
            .map(|v| format_value(*v))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    }

    out
}

/// Shortest round-trip text for a value, in exponent form when
/// the magnitude is very large or very small.
pub fn format_value(v: f64) -> String {
    let magnitude = v.abs();
    if v == 0.0 || (1e-4..1e15).contains(&magnitude) {
        v.to_string()
    } else {
        format!("{v:e}")
    }
}

/// The `generated at` timestamp, in the style SNNS writes it.
pub fn timestamp() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}
