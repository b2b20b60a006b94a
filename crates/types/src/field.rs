//! Field specifications describing what a widget exposes for configuration

use crate::color::Color;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Kind of value a configurable field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    LongText,
    /// Floating-point number, optionally constrained
    Number,
    /// RGBA color
    Color,
    /// Ordered list of strings
    List,
}

impl FieldKind {
    /// Stable lowercase name, used in error messages and logs
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "longText",
            FieldKind::Number => "number",
            FieldKind::Color => "color",
            FieldKind::List => "list",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Range constraints for a number field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericConstraints {
    pub min: f64,
    pub max: f64,
    /// Editing granularity hint for controls; not enforced by the store
    pub step: f64,
}

impl NumericConstraints {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Declarative description of a single configurable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Unique key within the schema
    pub key: String,
    /// Kind of value this field holds
    pub kind: FieldKind,
    /// Human-readable label shown next to the control
    pub label: String,
    /// Initial value, must match `kind`
    pub default: FieldValue,
    /// Present only for number fields with a bounded range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<NumericConstraints>,
    /// Section the field is displayed under
    pub group: String,
}

impl FieldSpec {
    pub fn text(
        key: impl Into<String>,
        label: impl Into<String>,
        default: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Text,
            label: label.into(),
            default: FieldValue::Text(default.into()),
            constraints: None,
            group: group.into(),
        }
    }

    pub fn long_text(
        key: impl Into<String>,
        label: impl Into<String>,
        default: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            kind: FieldKind::LongText,
            ..Self::text(key, label, default, group)
        }
    }

    pub fn number(
        key: impl Into<String>,
        label: impl Into<String>,
        default: f64,
        group: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Number,
            label: label.into(),
            default: FieldValue::Number(default),
            constraints: None,
            group: group.into(),
        }
    }

    pub fn color(
        key: impl Into<String>,
        label: impl Into<String>,
        default: Color,
        group: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Color,
            label: label.into(),
            default: FieldValue::Color(default),
            constraints: None,
            group: group.into(),
        }
    }

    pub fn list(
        key: impl Into<String>,
        label: impl Into<String>,
        default: &[&str],
        group: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::List,
            label: label.into(),
            default: FieldValue::List(default.iter().map(|s| s.to_string()).collect()),
            constraints: None,
            group: group.into(),
        }
    }

    /// Attach a `[min, max]` range and a step hint to a number field
    pub fn constrained(mut self, min: f64, max: f64, step: f64) -> Self {
        self.constraints = Some(NumericConstraints::new(min, max, step));
        self
    }
}
