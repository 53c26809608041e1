// ============================================================
// Layer 2 — Conversion Report
// ============================================================
// A record of what a run did: files written, rows dropped,
// unit counts, and the encoding of every attribute. The CLI
// prints it; with --report it is also saved as JSON.
//
// Example printout:
//
//   File output to: out/weather-train.pat (9 cases)
//   File output to: out/weather-test.pat (5 cases)
//
//   Discarded 2 cases with missing data
//   Number of inputs: 4
//   Number of outputs: 2
//
//   Attribute encoding (class: play)
//   temp
//       NUMERIC
//   outlook
//       sunny -> 1 0 0
//       rainy -> 0 1 0
//       overcast -> 0 0 1

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::application::convert_use_case::ConvertConfig;
use crate::domain::attribute::{AttributeDescriptor, Schema};
use crate::domain::dataset::LoadStats;
use crate::domain::policy::MISSING_TOKEN;
use crate::infra::pat_writer::PatLayout;

// ─── Attribute Encoding Summary ───────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCode {
    pub value: String,
    pub code:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSummary {
    /// Placeholder written for `?`
    pub code:  String,
    /// Number of values that were substituted
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSummary {
    pub name:    String,
    pub kind:    String,
    pub width:   usize,
    /// Nominal values and their bit patterns; empty for numeric
    pub codes:   Vec<ValueCode>,
    pub missing: Option<MissingSummary>,
}

impl AttributeSummary {
    /// Describe every attribute of `schema`. `substitutions` gives
    /// per-attribute counts of substituted missing values.
    pub fn describe(schema: &Schema, substitutions: &[usize]) -> Vec<Self> {
        schema
            .attributes
            .iter()
            .enumerate()
            .map(|(i, attr)| {
                let count   = substitutions.get(i).copied().unwrap_or(0);
                let missing = (count > 0).then(|| MissingSummary {
                    code: attr.missing_code(),
                    count,
                });
                let codes = match attr {
                    AttributeDescriptor::Numeric { .. } => Vec::new(),
                    AttributeDescriptor::Nominal { domain, .. } => domain
                        .iter()
                        .enumerate()
                        .map(|(j, value)| ValueCode { value: value.clone(), code: attr.code_for(j) })
                        .collect(),
                };
                AttributeSummary {
                    name: attr.name().to_string(),
                    kind: if attr.is_numeric() { "numeric" } else { "nominal" }.to_string(),
                    width: attr.width(),
                    codes,
                    missing,
                }
            })
            .collect()
    }
}

/// Write the per-attribute encoding table.
fn write_encoding_table(f: &mut fmt::Formatter<'_>, attributes: &[AttributeSummary]) -> fmt::Result {
    for attr in attributes {
        writeln!(f, "{}", attr.name)?;
        if attr.codes.is_empty() {
            writeln!(f, "\t{}", attr.kind.to_uppercase())?;
        }
        for c in &attr.codes {
            writeln!(f, "\t{} -> {}", c.value, c.code)?;
        }
        if let Some(m) = &attr.missing {
            writeln!(f, "\t{} -> {} ({} cases)", MISSING_TOKEN, m.code, m.count)?;
        }
    }
    Ok(())
}

// ─── ConversionReport ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenFile {
    /// "all", "train", "validation" or "test"
    pub subset:   String,
    pub path:     PathBuf,
    pub patterns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub relation:        Option<String>,
    pub config:          ConvertConfig,
    pub class_attribute: String,
    pub layout:          PatLayout,
    pub stats:           LoadStats,
    pub files:           Vec<WrittenFile>,
    pub attributes:      Vec<AttributeSummary>,
}

impl ConversionReport {
    #[cfg(test)]
    pub fn file(&self, subset: &str) -> Option<&WrittenFile> {
        self.files.iter().find(|f| f.subset == subset)
    }

    pub fn substituted_values(&self) -> usize {
        self.stats.substitutions.iter().sum()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "File output to: {} ({} cases)", file.path.display(), file.patterns)?;
        }
        writeln!(f)?;

        if self.stats.discarded_rows == 0 && self.substituted_values() == 0 {
            writeln!(f, "No missing values were detected")?;
        } else if self.stats.discarded_rows > 0 {
            writeln!(f, "Discarded {} cases with missing data", self.stats.discarded_rows)?;
        }
        if self.stats.invalid_rows > 0 {
            writeln!(f, "Skipped {} cases that could not be encoded", self.stats.invalid_rows)?;
        }

        writeln!(f, "Number of inputs: {}", self.layout.inputs)?;
        writeln!(f, "Number of outputs: {}", self.layout.outputs)?;
        writeln!(f)?;
        writeln!(f, "Attribute encoding (class: {})", self.class_attribute)?;
        write_encoding_table(f, &self.attributes)
    }
}

// ─── InspectReport ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectReport {
    pub relation:   Option<String>,
    pub width:      usize,
    pub attributes: Vec<AttributeSummary>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = &self.relation {
            writeln!(f, "Relation: {r}")?;
        }
        writeln!(f, "Attributes: {}", self.attributes.len())?;
        writeln!(f, "Encoded width: {}", self.width)?;
        writeln!(f)?;
        write_encoding_table(f, &self.attributes)
    }
}
