// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Parses only the ARFF header and reports how each attribute
// would be encoded, without reading or writing any patterns.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::report::{AttributeSummary, InspectReport};
use crate::data::schema::parse_schema;

pub struct InspectUseCase {
    arff: PathBuf,
}

impl InspectUseCase {
    pub fn new(arff: impl Into<PathBuf>) -> Self {
        Self { arff: arff.into() }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        let text = fs::read_to_string(&self.arff)
            .with_context(|| format!("Cannot read '{}'", self.arff.display()))?;
        let schema = parse_schema(&text)?;

        tracing::info!("'{}' declares {} attributes", self.arff.display(), schema.len());

        Ok(InspectReport {
            relation:   schema.relation.clone(),
            width:      schema.width(),
            attributes: AttributeSummary::describe(&schema, &[]),
        })
    }
}
