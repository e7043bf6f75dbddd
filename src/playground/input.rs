//! User input parsing
//!
//! Raw text from the value field is split into tokens first, then every token
//! is checked against the strict numeric pattern. A batch is rejected as a
//! whole on the first bad token, before any structure is touched.
//!
//! Accepted forms:
//!
//! ```text
//! 7            single value
//! [7, 3, 2]    bracketed list (JSON, or comma-split when JSON fails)
//! (7, 3, 2)    parenthesized list
//! 7, 3, 2      comma separated
//! 7 3 2        whitespace separated, when the first token is numeric
//! ```

use super::errors::PlaygroundError;
use crate::structures::payload::parse_number;
use serde_json::Value as Json;

/// Split raw input into trimmed, non-empty tokens
pub fn tokenize(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let looks_like_list = (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('(') && trimmed.ends_with(')'));

    if looks_like_list && trimmed.len() >= 2 {
        let inner = &trimmed[1..trimmed.len() - 1];
        let json_text = format!("[{}]", inner.replace('\'', "\""));
        match serde_json::from_str::<Vec<Json>>(&json_text) {
            Ok(items) => {
                return items
                    .iter()
                    .map(json_token)
                    .filter(|token| !token.is_empty())
                    .collect();
            }
            Err(_) => {
                let manual = split_on(inner, ',');
                if !manual.is_empty() {
                    return manual;
                }
            }
        }
    }

    if trimmed.contains(',') {
        return split_on(trimmed, ',');
    }

    let mut words = trimmed.split_whitespace();
    let first_is_numeric = words
        .next()
        .is_some_and(|first| first.parse::<f64>().is_ok_and(|v| !v.is_nan()));
    if words.next().is_some() && first_is_numeric {
        return trimmed.split_whitespace().map(str::to_string).collect();
    }

    vec![trimmed.to_string()]
}

fn split_on(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_token(item: &Json) -> String {
    match item {
        Json::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Tokenize and validate every token as a number
pub fn parse_numeric_tokens(raw: &str) -> Result<Vec<f64>, PlaygroundError> {
    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return Err(PlaygroundError::EmptyInput);
    }

    tokens
        .into_iter()
        .map(|token| parse_number(&token).ok_or(PlaygroundError::MalformedInput { token }))
        .collect()
}

/// Empty text means "no index"; anything else must be an integer
pub fn parse_optional_index(raw: &str) -> Result<Option<i64>, PlaygroundError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(index) = trimmed.parse::<i64>() {
        return Ok(Some(index));
    }

    // Integral decimals such as "2.0" are still integers
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            Ok(Some(v as i64))
        }
        _ => Err(PlaygroundError::InvalidIndexInput),
    }
}
