// ============================================================
// Layer 4 — Attribute Schema Parser
// ============================================================
// Reads the ARFF header up to and including the `@data`
// marker:
//
//   % comment
//   @relation weather
//   @attribute temp numeric
//   @attribute 'wind speed' real
//   @attribute outlook {sunny, rainy, overcast}
//   @data
//
// Keywords are case-insensitive. Names and nominal values may
// be quoted with ' or ". Only numeric (numeric/real/integer)
// and enumerated types are accepted; anything else is a
// SchemaError.

use crate::domain::attribute::{AttributeDescriptor, Schema};
use crate::domain::error::ConvertError;

const NUMERIC_TYPES: [&str; 3] = ["numeric", "real", "integer"];

/// Parse the header section of an ARFF document.
///
/// Line numbers in errors are 1-based.
pub fn parse_schema(text: &str) -> Result<Schema, ConvertError> {
    let mut relation   = None;
    let mut attributes = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line    = raw.trim();

        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if let Some(rest) = strip_keyword(line, "@relation") {
            relation = Some(unquote(rest.trim()).to_string());
        } else if let Some(rest) = strip_keyword(line, "@attribute") {
            attributes.push(parse_attribute(rest, line_no)?);
        } else if strip_keyword(line, "@data").is_some() {
            if attributes.is_empty() {
                return Err(ConvertError::schema(line_no, "no attributes declared before @data"));
            }
            tracing::debug!("Parsed {} attribute declarations", attributes.len());
            return Ok(Schema { relation, attributes, data_start: idx + 1 });
        } else {
            return Err(ConvertError::schema(
                line_no,
                format!("cannot classify header line '{line}'"),
            ));
        }
    }

    Err(ConvertError::schema(text.lines().count(), "no @data section found"))
}

/// Parse the part of an `@attribute` line after the keyword.
fn parse_attribute(rest: &str, line_no: usize) -> Result<AttributeDescriptor, ConvertError> {
    let rest = rest.trim();
    let (name, type_spec) = split_name(rest)
        .ok_or_else(|| ConvertError::schema(line_no, "unterminated quote in attribute name"))?;

    if name.is_empty() {
        return Err(ConvertError::schema(line_no, "attribute has no name"));
    }

    let type_spec = type_spec.trim();
    if type_spec.is_empty() {
        return Err(ConvertError::schema(line_no, format!("attribute '{name}' has no type")));
    }

    let closing = match type_spec.chars().next() {
        Some('{') => Some('}'),
        Some('(') => Some(')'),
        _         => None,
    };

    if let Some(close) = closing {
        if !type_spec.ends_with(close) || type_spec.len() < 2 {
            return Err(ConvertError::schema(
                line_no,
                format!("unterminated value list for attribute '{name}'"),
            ));
        }
        let inner  = &type_spec[1..type_spec.len() - 1];
        let domain = parse_domain(inner);
        if domain.iter().any(String::is_empty) {
            return Err(ConvertError::schema(
                line_no,
                format!("empty value in domain of attribute '{name}'"),
            ));
        }
        return Ok(AttributeDescriptor::nominal(name, domain));
    }

    let keyword = type_spec.to_ascii_lowercase();
    if NUMERIC_TYPES.contains(&keyword.as_str()) {
        Ok(AttributeDescriptor::numeric(name))
    } else {
        Err(ConvertError::schema(
            line_no,
            format!("unsupported type '{type_spec}' for attribute '{name}'"),
        ))
    }
}

/// Split a declaration into (name, type). Returns None on an
/// unterminated quoted name.
fn split_name(rest: &str) -> Option<(&str, &str)> {
    match rest.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let close = rest[1..].find(q)? + 1;
            Some((&rest[1..close], &rest[close + 1..]))
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '{' || c == '(')
                .unwrap_or(rest.len());
            Some((&rest[..end], &rest[end..]))
        }
    }
}

fn parse_domain(inner: &str) -> Vec<String> {
    split_quoted(inner).into_iter().map(|v| unquote(v.trim()).to_string()).collect()
}

/// Split on commas that are not inside ' or " quotes.
pub(crate) fn split_quoted(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match (quote, c) {
            (None, '\'' | '"')        => quote = Some(c),
            (Some(q), c) if c == q    => quote = None,
            (None, ',')               => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Remove one pair of matching surrounding quotes.
pub(crate) fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// If `line` starts with `keyword` (any case) followed by
/// whitespace or end of line, return the remainder.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    match rest.chars().next() {
        None                         => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        _                            => None,
    }
}
