//! Tagged value type carried by configurations
//!
//! Every configuration entry is one of these variants; the store, control
//! generator and renderers match exhaustively, so a value of the wrong shape
//! cannot travel silently.

use crate::color::Color;
use crate::field::FieldKind;
use serde::{Deserialize, Serialize};

/// Current value of one configurable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Color(Color),
    List(Vec<String>),
}

impl FieldValue {
    /// Stable lowercase name of the carried variant, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Color(_) => "color",
            FieldValue::List(_) => "list",
        }
    }

    /// Whether this value is acceptable for a field of the given kind.
    ///
    /// Text values satisfy both text kinds; the kind difference only selects
    /// the control shape.
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::Text(_), FieldKind::Text | FieldKind::LongText)
                | (FieldValue::Number(_), FieldKind::Number)
                | (FieldValue::Color(_), FieldKind::Color)
                | (FieldValue::List(_), FieldKind::List)
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            FieldValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Color> for FieldValue {
    fn from(c: Color) -> Self {
        FieldValue::Color(c)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Color(c) => write!(f, "{}", c),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matches_both_text_kinds() {
        let v = FieldValue::from("hello");
        assert!(v.matches_kind(FieldKind::Text));
        assert!(v.matches_kind(FieldKind::LongText));
        assert!(!v.matches_kind(FieldKind::Number));
    }

    #[test]
    fn test_serde_shape() {
        let v = FieldValue::Number(60.0);
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            "{\"type\":\"number\",\"value\":60.0}"
        );
        let back: FieldValue = serde_json::from_str("{\"type\":\"text\",\"value\":\"hi\"}").unwrap();
        assert_eq!(back, FieldValue::from("hi"));
    }

    #[test]
    fn test_color_value_serializes_as_hex() {
        let v = FieldValue::Color(Color::from_hex("#ef4444").unwrap());
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"#ef4444\""));
    }
}
