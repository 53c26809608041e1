// ============================================================
// Layer 4 — Row Encoder
// ============================================================
// Turns one data line into a fixed-length numeric vector.
//
//   schema:  temp numeric, outlook {sunny, rainy, overcast}
//   line:    72.0,sunny
//   tokens:  ["72.0", "sunny"]
//   values:  [72.0, 1, 0, 0]
//
// Missing values (`?`) follow the MissingPolicy. Discarding is
// row-level: the first field that triggers a discard drops the
// whole row.

use crate::data::schema::{split_quoted, unquote};
use crate::domain::attribute::{FieldEncoding, Schema};
use crate::domain::dataset::EncodedRow;
use crate::domain::error::ConvertError;
use crate::domain::policy::MissingPolicy;

/// The result of encoding one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The row was kept. `substituted` lists the attribute
    /// indices whose missing value got a placeholder.
    Encoded {
        row:         EncodedRow,
        substituted: Vec<usize>,
    },

    /// A missing value fell under a discard policy
    Discarded,
}

pub struct RowEncoder<'a> {
    schema: &'a Schema,
    policy: MissingPolicy,
    /// Column whose raw token becomes the row label
    target: Option<usize>,
}

impl<'a> RowEncoder<'a> {
    pub fn new(schema: &'a Schema, policy: MissingPolicy, target: Option<usize>) -> Self {
        Self { schema, policy, target }
    }

    /// Encode one row of raw tokens. `line` is only used in errors.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S], line: usize) -> Result<RowOutcome, ConvertError> {
        if tokens.len() != self.schema.len() {
            return Err(ConvertError::encoding(
                line,
                format!(
                    "expected {} values, found {}",
                    self.schema.len(),
                    tokens.len()
                ),
            ));
        }

        let label = self.target.map(|i| tokens[i].as_ref().to_string());

        let mut values      = Vec::with_capacity(self.schema.width());
        let mut substituted = Vec::new();

        for (i, (attr, token)) in self.schema.attributes.iter().zip(tokens).enumerate() {
            match attr
                .encode_into(token.as_ref(), &self.policy, &mut values)
                .map_err(|msg| ConvertError::encoding(line, msg))?
            {
                FieldEncoding::Present     => {}
                FieldEncoding::Substituted => substituted.push(i),
                FieldEncoding::Discard     => return Ok(RowOutcome::Discarded),
            }
        }

        debug_assert_eq!(values.len(), self.schema.width());
        Ok(RowOutcome::Encoded { row: EncodedRow::new(values, label), substituted })
    }
}

/// Split a data line into trimmed, unquoted tokens.
///
/// Sparse rows (`{0 1, 3 x}`) are not supported.
pub fn split_row(line: &str, line_no: usize) -> Result<Vec<String>, ConvertError> {
    let line = line.trim();
    if line.starts_with('{') {
        return Err(ConvertError::encoding(line_no, "sparse data rows are not supported"));
    }
    Ok(split_quoted(line)
        .into_iter()
        .map(|t| unquote(t.trim()).to_string())
        .collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attribute::AttributeDescriptor;

    fn weather() -> Schema {
        Schema::new(vec![
            AttributeDescriptor::numeric("temp"),
            AttributeDescriptor::nominal("outlook", ["sunny", "rainy", "overcast"]),
        ])
    }

    fn values(outcome: RowOutcome) -> Vec<f64> {
        match outcome {
            RowOutcome::Encoded { row, .. } => row.values,
            RowOutcome::Discarded           => panic!("row was discarded"),
        }
    }

    #[test]
    fn test_present_values() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::default(), None);
        assert_eq!(values(enc.encode(&["72.0", "sunny"], 1).unwrap()), vec![72.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_numeric_kept() {
        let s       = weather();
        let enc     = RowEncoder::new(&s, MissingPolicy::new(false, true), None);
        let outcome = enc.encode(&["?", "rainy"], 1).unwrap();
        match outcome {
            RowOutcome::Encoded { row, substituted } => {
                assert_eq!(row.values, vec![0.0, 0.0, 1.0, 0.0]);
                assert_eq!(substituted, vec![0]);
            }
            RowOutcome::Discarded => panic!("row was discarded"),
        }
    }

    #[test]
    fn test_missing_numeric_discarded() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::new(true, false), None);
        assert_eq!(enc.encode(&["?", "rainy"], 1).unwrap(), RowOutcome::Discarded);
    }

    #[test]
    fn test_missing_nominal_kept_is_all_zero() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::keep_all(), None);
        assert_eq!(values(enc.encode(&["60", "?"], 1).unwrap()), vec![60.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_discard_wins_over_later_fields() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::discard_all(), None);
        // "foggy" would be an error, but the row is already gone
        assert_eq!(enc.encode(&["?", "foggy"], 1).unwrap(), RowOutcome::Discarded);
    }

    #[test]
    fn test_unknown_nominal_is_encoding_error() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::default(), None);
        let err = enc.encode(&["65.0", "foggy"], 7).unwrap_err();
        assert!(err.is_encoding());
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_wrong_token_count() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::default(), None);
        assert!(enc.encode(&["65.0"], 3).unwrap_err().is_encoding());
    }

    #[test]
    fn test_label_is_raw_token() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::default(), Some(1));
        match enc.encode(&["70", "overcast"], 1).unwrap() {
            RowOutcome::Encoded { row, .. } => assert_eq!(row.label.as_deref(), Some("overcast")),
            RowOutcome::Discarded           => panic!("row was discarded"),
        }
    }

    #[test]
    fn test_every_row_has_schema_width() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::keep_all(), None);
        for row in [["1", "sunny"], ["?", "?"], ["-3.5e2", "overcast"]] {
            assert_eq!(values(enc.encode(&row, 1).unwrap()).len(), s.width());
        }
    }

    #[test]
    fn test_round_trip_through_decode() {
        let s   = weather();
        let enc = RowEncoder::new(&s, MissingPolicy::default(), None);
        for token in ["sunny", "rainy", "overcast"] {
            let v       = values(enc.encode(&["12.5", token], 1).unwrap());
            let decoded = s.decode(&v).unwrap();
            assert_eq!(decoded[1], token);
            assert_eq!(decoded[0].parse::<f64>().unwrap(), 12.5);
        }
    }

    #[test]
    fn test_split_row() {
        assert_eq!(split_row(" 72 , 'light rain',x ", 1).unwrap(), vec!["72", "light rain", "x"]);
        assert!(split_row("{0 1, 2 yes}", 1).is_err());
    }
}
