// ============================================================
// Layer 3 — Encoded Rows, Datasets and Splits
// ============================================================
// After encoding, every data row is a flat Vec<f64> whose
// length is fixed by the schema. A Dataset is an ordered list
// of such rows; a Split partitions its row indices into
// train / validation / test.

use serde::{Deserialize, Serialize};

use crate::domain::attribute::Schema;

// ─── EncodedRow ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRow {
    /// Encoded values; length == schema.width()
    pub values: Vec<f64>,

    /// Raw token of the class attribute, used for stratification
    pub label: Option<String>,
}

impl EncodedRow {
    pub fn new(values: Vec<f64>, label: Option<String>) -> Self {
        Self { values, label }
    }
}

// ─── Dataset ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub schema: Schema,
    pub rows:   Vec<EncodedRow>,
}

impl Dataset {
    pub fn new(schema: Schema, rows: Vec<EncodedRow>) -> Self {
        Self { schema, rows }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Labels aligned with `rows`; rows without a label share the empty stratum.
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.label.as_deref().unwrap_or(""))
            .collect()
    }

    /// Rows at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Vec<&EncodedRow> {
        indices.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Min-max scale one column to [0, 1] in place.
    /// A constant column becomes all zeros.
    pub fn scale_column(&mut self, column: usize) {
        let (min, max) = self.rows.iter().map(|r| r.values[column]).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        );
        let range = max - min;
        for row in &mut self.rows {
            let v = row.values[column];
            row.values[column] = if range > 0.0 { (v - min) / range } else { 0.0 };
        }
    }
}

// ─── LoadedDataset ────────────────────────────────────────────────────────────
/// A dataset plus the bookkeeping gathered while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,

    /// Index of the class attribute in the schema
    pub class_index: usize,

    pub stats: LoadStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data rows read from the source
    pub total_rows: usize,

    /// Rows dropped under the missing-value policy
    pub discarded_rows: usize,

    /// Rows dropped because they could not be encoded
    pub invalid_rows: usize,

    /// Per attribute: missing values replaced by a placeholder
    pub substitutions: Vec<usize>,
}

// ─── Split ────────────────────────────────────────────────────────────────────
/// Disjoint row-index subsets covering the retained rows once each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train:      Vec<usize>,
    pub validation: Vec<usize>,
    pub test:       Vec<usize>,
}

impl Split {
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }
}

/// What the partitioner hands to the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Partition {
    /// No split requested: the full dataset in source order
    Whole(Vec<usize>),
    Split(Split),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attribute::AttributeDescriptor;

    fn dataset(values: &[f64]) -> Dataset {
        let schema = Schema::new(vec![AttributeDescriptor::numeric("y")]);
        let rows   = values.iter().map(|v| EncodedRow::new(vec![*v], None)).collect();
        Dataset::new(schema, rows)
    }

    #[test]
    fn test_scale_column() {
        let mut d = dataset(&[10.0, 20.0, 15.0]);
        d.scale_column(0);
        let scaled: Vec<f64> = d.rows.iter().map(|r| r.values[0]).collect();
        assert_eq!(scaled, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_scale_constant_column() {
        let mut d = dataset(&[3.0, 3.0]);
        d.scale_column(0);
        assert!(d.rows.iter().all(|r| r.values[0] == 0.0));
    }

    #[test]
    fn test_labels_default_to_empty() {
        let d = dataset(&[1.0]);
        assert_eq!(d.labels(), vec![""]);
    }
}
