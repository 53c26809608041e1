// ============================================================
// Layer 4 — ARFF Loader
// ============================================================
// Reads an ARFF file and runs the whole encode pass:
//
//   source text
//       │
//       ▼
//   parse_schema   → Schema (attributes + where @data starts)
//       │
//       ▼
//   split_row      → raw tokens per data line
//       │
//       ▼
//   RowEncoder     → EncodedRow, or the row is dropped
//       │
//       ▼
//   LoadedDataset  → rows + discard/substitution statistics
//
// Implements the DatasetSource trait from Layer 3.

use std::fs;
use std::path::PathBuf;

use crate::data::encoder::{split_row, RowEncoder, RowOutcome};
use crate::data::schema::parse_schema;
use crate::domain::dataset::{Dataset, LoadStats, LoadedDataset};
use crate::domain::error::ConvertError;
use crate::domain::policy::MissingPolicy;
use crate::domain::traits::DatasetSource;

/// How rows are encoded while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub policy: MissingPolicy,

    /// Class attribute name; None means the last attribute
    pub class_attribute: Option<String>,

    /// Record the class token on each row for stratification.
    /// Only nominal classes are labelled.
    pub capture_labels: bool,

    /// Drop rows that fail to encode instead of aborting
    pub skip_invalid: bool,
}

pub struct ArffLoader {
    path:    PathBuf,
    options: LoadOptions,
}

impl ArffLoader {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self { path: path.into(), options }
    }

    /// Parse and encode an ARFF document held in memory.
    pub fn load_str(&self, text: &str) -> Result<LoadedDataset, ConvertError> {
        let schema      = parse_schema(text)?;
        let class_index = schema.class_index(self.options.class_attribute.as_deref())?;

        let target = (self.options.capture_labels && !schema.attributes[class_index].is_numeric())
            .then_some(class_index);

        let mut stats = LoadStats {
            substitutions: vec![0; schema.len()],
            ..LoadStats::default()
        };
        let mut rows = Vec::new();

        {
            let encoder = RowEncoder::new(&schema, self.options.policy, target);

            for (idx, raw) in text.lines().enumerate().skip(schema.data_start) {
                let line_no = idx + 1;
                let line    = raw.trim();
                if line.is_empty() || line.starts_with('%') {
                    continue;
                }
                stats.total_rows += 1;

                let outcome = split_row(line, line_no).and_then(|tokens| encoder.encode(tokens.as_slice(), line_no));
                match outcome {
                    Ok(RowOutcome::Encoded { row, substituted }) => {
                        for i in substituted {
                            stats.substitutions[i] += 1;
                        }
                        rows.push(row);
                    }
                    Ok(RowOutcome::Discarded) => stats.discarded_rows += 1,
                    Err(e) if e.is_encoding() && self.options.skip_invalid => {
                        tracing::warn!("Skipping row: {}", e);
                        stats.invalid_rows += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        tracing::info!(
            "Encoded {} of {} rows ({} discarded, {} invalid)",
            rows.len(),
            stats.total_rows,
            stats.discarded_rows,
            stats.invalid_rows,
        );

        Ok(LoadedDataset {
            dataset: Dataset::new(schema, rows),
            class_index,
            stats,
        })
    }
}

impl DatasetSource for ArffLoader {
    fn load(&self) -> Result<LoadedDataset, ConvertError> {
        tracing::info!("Reading ARFF file '{}'", self.path.display());
        let text = fs::read_to_string(&self.path).map_err(|e| ConvertError::io(&self.path, e))?;
        self.load_str(&text)
    }
}
