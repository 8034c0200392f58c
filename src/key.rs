//! Identifier values shared by all four tables.

use serde::Serialize;
use std::fmt;

/// Largest integral float that still converts to `i64` without loss.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// An id cell, normalized so that `1`, `01` and `1.0` refer to the same row.
///
/// Integral ids serialize as JSON numbers, anything else as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Key::Int(n);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT_FLOAT => {
                Key::Int(v as i64)
            }
            _ => Key::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_forms_normalize() {
        assert_eq!(Key::parse("1"), Key::Int(1));
        assert_eq!(Key::parse(" 01 "), Key::Int(1));
        assert_eq!(Key::parse("1.0"), Key::Int(1));
        assert_eq!(Key::parse("-3"), Key::Int(-3));
    }

    #[test]
    fn test_text_keys_kept_verbatim() {
        assert_eq!(Key::parse("c-101"), Key::Text("c-101".to_string()));
        assert_eq!(Key::parse("1.5"), Key::Text("1.5".to_string()));
        assert_eq!(Key::parse("inf"), Key::Text("inf".to_string()));
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Key::Int(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&Key::Text("a".into())).unwrap(),
            "\"a\""
        );
    }
}
