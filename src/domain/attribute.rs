// ============================================================
// Layer 3 — Attribute Descriptors and Schema
// ============================================================
// An ARFF header declares one attribute per line:
//
//   @attribute temperature numeric
//   @attribute outlook     {sunny, rainy, overcast}
//
// Each declaration becomes one AttributeDescriptor. The
// descriptor decides how its column is encoded:
//
//   Numeric          → 1 value, passed through
//   Nominal{a,b,c}   → 3 values, one-hot ("b" → 0 1 0)
//
// Declaration order is both the column order of a data row
// and the layout of the encoded vector.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConvertError;
use crate::domain::policy::{is_missing, MissingPolicy};

// ─── AttributeDescriptor ──────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeDescriptor {
    /// `numeric`, `real` or `integer` attribute
    Numeric { name: String },

    /// Enumerated attribute; `domain` order is the one-hot bit order
    Nominal { name: String, domain: Vec<String> },
}

/// What happened to a single field during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// A present value was encoded
    Present,
    /// A missing value was replaced by its placeholder
    Substituted,
    /// A missing value under a discard policy; the row must go
    Discard,
}

impl AttributeDescriptor {
    pub fn numeric(name: impl Into<String>) -> Self {
        AttributeDescriptor::Numeric { name: name.into() }
    }

    pub fn nominal<S: Into<String>>(name: impl Into<String>, domain: impl IntoIterator<Item = S>) -> Self {
        AttributeDescriptor::Nominal {
            name:   name.into(),
            domain: domain.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AttributeDescriptor::Numeric { name } | AttributeDescriptor::Nominal { name, .. } => name,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeDescriptor::Numeric { .. })
    }

    /// Number of values this attribute contributes to an encoded row.
    pub fn width(&self) -> usize {
        match self {
            AttributeDescriptor::Numeric { .. }          => 1,
            AttributeDescriptor::Nominal { domain, .. } => domain.len(),
        }
    }

    /// Encode one raw token, appending `width()` values to `out`.
    ///
    /// On `Discard` nothing is appended. On error the message
    /// describes the offending token; the caller adds the line.
    pub fn encode_into(
        &self,
        token:  &str,
        policy: &MissingPolicy,
        out:    &mut Vec<f64>,
    ) -> Result<FieldEncoding, String> {
        match self {
            AttributeDescriptor::Numeric { name } => {
                if is_missing(token) {
                    if policy.discard_numeric {
                        return Ok(FieldEncoding::Discard);
                    }
                    out.push(0.0);
                    return Ok(FieldEncoding::Substituted);
                }
                let value: f64 = token
                    .parse()
                    .map_err(|_| format!("'{token}' is not a number (attribute '{name}')"))?;
                if !value.is_finite() {
                    return Err(format!("'{token}' is not a finite number (attribute '{name}')"));
                }
                out.push(value);
                Ok(FieldEncoding::Present)
            }
            AttributeDescriptor::Nominal { name, domain } => {
                if is_missing(token) {
                    if policy.discard_nominal {
                        return Ok(FieldEncoding::Discard);
                    }
                    out.extend(std::iter::repeat(0.0).take(domain.len()));
                    return Ok(FieldEncoding::Substituted);
                }
                let hot = domain
                    .iter()
                    .position(|v| v == token)
                    .ok_or_else(|| format!("'{token}' is not in the domain of attribute '{name}'"))?;
                out.extend((0..domain.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
                Ok(FieldEncoding::Present)
            }
        }
    }

    /// Turn an encoded block back into a token.
    ///
    /// Numeric blocks give the number; an all-zero nominal block
    /// gives `?`. Returns None for a block that is not valid
    /// one-hot or has the wrong width.
    #[cfg(test)]
    pub fn decode(&self, block: &[f64]) -> Option<String> {
        if block.len() != self.width() {
            return None;
        }
        match self {
            AttributeDescriptor::Numeric { .. } => Some(block[0].to_string()),
            AttributeDescriptor::Nominal { domain, .. } => {
                let hot: Vec<usize> = block
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v != 0.0)
                    .map(|(i, _)| i)
                    .collect();
                match hot.as_slice() {
                    []                      => Some("?".to_string()),
                    [i] if block[*i] == 1.0 => Some(domain[*i].clone()),
                    _                       => None,
                }
            }
        }
    }

    /// The bit pattern a nominal value is encoded as, e.g. "0 1 0".
    pub fn code_for(&self, index: usize) -> String {
        (0..self.width())
            .map(|i| if i == index { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The placeholder written for a missing value.
    pub fn missing_code(&self) -> String {
        vec!["0"; self.width()].join(" ")
    }
}

// ─── Schema ───────────────────────────────────────────────────────────────────
/// The parsed ARFF header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Name from `@relation`, if declared
    pub relation: Option<String>,

    /// Attributes in declaration order
    pub attributes: Vec<AttributeDescriptor>,

    /// Zero-based index of the first line after `@data`
    pub data_start: usize,
}

impl Schema {
    #[cfg(test)]
    pub fn new(attributes: Vec<AttributeDescriptor>) -> Self {
        Self { relation: None, attributes, data_start: 0 }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Length of every encoded row.
    pub fn width(&self) -> usize {
        self.attributes.iter().map(AttributeDescriptor::width).sum()
    }

    /// Start of attribute `index`'s block in an encoded row.
    pub fn offset_of(&self, index: usize) -> usize {
        self.attributes[..index].iter().map(AttributeDescriptor::width).sum()
    }

    /// Index of the attribute called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    /// Index of the class attribute: the one named, or the last one.
    pub fn class_index(&self, name: Option<&str>) -> Result<usize, ConvertError> {
        match name {
            Some(n) => self
                .position_of(n)
                .ok_or_else(|| ConvertError::Config(format!("no attribute named '{n}'"))),
            None => self
                .len()
                .checked_sub(1)
                .ok_or_else(|| ConvertError::Config("schema has no attributes".to_string())),
        }
    }

    /// Decode a full encoded row back to one token per attribute.
    #[cfg(test)]
    pub fn decode(&self, values: &[f64]) -> Option<Vec<String>> {
        if values.len() != self.width() {
            return None;
        }
        let mut offset = 0;
        let mut tokens = Vec::with_capacity(self.len());
        for attr in &self.attributes {
            let end = offset + attr.width();
            tokens.push(attr.decode(&values[offset..end])?);
            offset = end;
        }
        Some(tokens)
    }
}
