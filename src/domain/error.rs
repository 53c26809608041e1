// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the conversion pipeline can produce.
// The data and infra layers return `Result<T, ConvertError>`;
// the application and CLI layers wrap these in anyhow for
// context and reporting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Malformed or unrecognised header declaration
    #[error("schema error at line {line}: {message}")]
    Schema { line: usize, message: String },

    /// A data token that cannot be encoded under the parsed schema
    #[error("encoding error at line {line}: {message}")]
    Encoding { line: usize, message: String },

    /// The requested split cannot be satisfied
    #[error("partition error: {0}")]
    Partition(String),

    /// Invalid run configuration (fractions, class attribute)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Read or write failure at the file boundary
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn schema(line: usize, message: impl Into<String>) -> Self {
        ConvertError::Schema { line, message: message.into() }
    }

    pub fn encoding(line: usize, message: impl Into<String>) -> Self {
        ConvertError::Encoding { line, message: message.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io { path: path.into(), source }
    }

    /// True for errors raised while encoding a single data row.
    pub fn is_encoding(&self) -> bool {
        matches!(self, ConvertError::Encoding { .. })
    }
}
