// ============================================================
// Layer 3 — Missing-Value Policy
// ============================================================
// ARFF marks a missing value with the literal token `?`.
// Each attribute kind gets its own switch:
//   discard  → the whole row is dropped
//   keep     → numeric becomes 0.0, nominal becomes an all-zero block

use serde::{Deserialize, Serialize};

/// The literal ARFF uses for a missing value.
pub const MISSING_TOKEN: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPolicy {
    /// Drop rows with a missing numeric value
    pub discard_numeric: bool,

    /// Drop rows with a missing nominal value
    pub discard_nominal: bool,
}

impl MissingPolicy {
    pub fn new(discard_numeric: bool, discard_nominal: bool) -> Self {
        Self { discard_numeric, discard_nominal }
    }

    /// Substitute placeholders for every missing value.
    #[cfg(test)]
    pub fn keep_all() -> Self {
        Self::new(false, false)
    }

    /// Drop every row that has any missing value.
    pub fn discard_all() -> Self {
        Self::new(true, true)
    }
}

impl Default for MissingPolicy {
    fn default() -> Self {
        Self::discard_all()
    }
}

/// Whether a raw token is the missing-value marker.
pub fn is_missing(token: &str) -> bool {
    token == MISSING_TOKEN
}
