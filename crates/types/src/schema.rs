//! Widget schemas and live configurations
//!
//! A `Schema` is the ordered, validated collection of `FieldSpec`s a widget
//! declares; a `Configuration` is the fully-populated key to value mapping
//! derived from it. Derivation copies every default, so a configuration never
//! has missing keys for its widget.

use crate::color::Color;
use crate::field::{FieldKind, FieldSpec};
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Violations of the schema/value shape contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate field key `{0}`")]
    DuplicateField(String),
    #[error("default for field `{key}` does not match kind {kind} (got {found})")]
    DefaultMismatch {
        key: String,
        kind: FieldKind,
        found: &'static str,
    },
    #[error("no field `{0}` in the schema")]
    MissingField(String),
    #[error("field `{key}` holds {found}, expected {expected}")]
    WrongKind {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("index {index} out of bounds for list `{key}` of length {len}")]
    IndexOutOfBounds {
        key: String,
        index: usize,
        len: usize,
    },
}

/// Ordered, grouped collection of field specifications for one widget.
///
/// Construction validates key uniqueness and default/kind agreement, so every
/// schema in circulation can derive defaults infallibly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn from_specs(specs: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        for (i, spec) in specs.iter().enumerate() {
            if specs[..i].iter().any(|other| other.key == spec.key) {
                return Err(SchemaError::DuplicateField(spec.key.clone()));
            }
            if !spec.default.matches_kind(spec.kind) {
                return Err(SchemaError::DefaultMismatch {
                    key: spec.key.clone(),
                    kind: spec.kind,
                    found: spec.default.kind_name(),
                });
            }
        }
        Ok(Self { fields: specs })
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Derive the initial configuration: one entry per field, each holding a
    /// copy of the declared default, in schema order.
    pub fn defaults(&self) -> Configuration {
        let mut config = Configuration::default();
        for spec in &self.fields {
            config.insert(spec.key.clone(), spec.default.clone());
        }
        config
    }
}

impl TryFrom<Vec<FieldSpec>> for Schema {
    type Error = SchemaError;

    fn try_from(specs: Vec<FieldSpec>) -> Result<Self, Self::Error> {
        Self::from_specs(specs)
    }
}

impl From<Schema> for Vec<FieldSpec> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

/// Current values for every field of the active widget instance.
///
/// Iteration order follows the schema the configuration was derived from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    values: IndexMap<String, FieldValue>,
}

impl Configuration {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.values.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, key: &str) -> Result<&FieldValue, SchemaError> {
        self.values
            .get(key)
            .ok_or_else(|| SchemaError::MissingField(key.to_string()))
    }

    fn wrong_kind(key: &str, expected: &'static str, found: &FieldValue) -> SchemaError {
        SchemaError::WrongKind {
            key: key.to_string(),
            expected,
            found: found.kind_name(),
        }
    }

    pub fn text(&self, key: &str) -> Result<&str, SchemaError> {
        let value = self.require(key)?;
        value
            .as_text()
            .ok_or_else(|| Self::wrong_kind(key, "text", value))
    }

    pub fn number(&self, key: &str) -> Result<f64, SchemaError> {
        let value = self.require(key)?;
        value
            .as_number()
            .ok_or_else(|| Self::wrong_kind(key, "number", value))
    }

    pub fn color(&self, key: &str) -> Result<Color, SchemaError> {
        let value = self.require(key)?;
        value
            .as_color()
            .ok_or_else(|| Self::wrong_kind(key, "color", value))
    }

    pub fn list(&self, key: &str) -> Result<&[String], SchemaError> {
        let value = self.require(key)?;
        value
            .as_list()
            .ok_or_else(|| Self::wrong_kind(key, "list", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::from_specs(vec![
            FieldSpec::text("title", "Title", "Hello", "Content"),
            FieldSpec::number("count", "Count", 3.0, "Content").constrained(0.0, 10.0, 1.0),
            FieldSpec::color("tint", "Tint", Color::from_rgba8(0xff, 0x00, 0x00, 0xff), "Looks"),
            FieldSpec::list("names", "Names", &["a", "b"], "Content"),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_cover_every_key_with_matching_kinds() {
        let schema = sample_schema();
        let config = schema.defaults();
        assert_eq!(config.len(), schema.len());
        for spec in schema.fields() {
            let value = config.get(&spec.key).unwrap();
            assert!(value.matches_kind(spec.kind), "key {}", spec.key);
            assert_eq!(value, &spec.default);
        }
    }

    #[test]
    fn test_defaults_preserve_schema_order() {
        let config = sample_schema().defaults();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["title", "count", "tint", "names"]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = Schema::from_specs(vec![
            FieldSpec::text("x", "X", "1", "g"),
            FieldSpec::text("x", "X again", "2", "g"),
        ]);
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateField("x".into()));
    }

    #[test]
    fn test_mismatched_default_rejected() {
        let bad = FieldSpec {
            default: FieldValue::Number(1.0),
            ..FieldSpec::text("x", "X", "", "g")
        };
        let err = Schema::from_specs(vec![bad]).unwrap_err();
        assert!(matches!(err, SchemaError::DefaultMismatch { .. }));
    }

    #[test]
    fn test_typed_getters() {
        let config = sample_schema().defaults();
        assert_eq!(config.text("title").unwrap(), "Hello");
        assert_eq!(config.number("count").unwrap(), 3.0);
        assert_eq!(config.list("names").unwrap(), ["a", "b"]);
        assert!(matches!(
            config.text("count"),
            Err(SchemaError::WrongKind { .. })
        ));
        assert!(matches!(
            config.text("absent"),
            Err(SchemaError::MissingField(_))
        ));
    }

    #[test]
    fn test_schema_deserialization_revalidates() {
        let json = r#"[
            {"key": "a", "kind": "text", "label": "A", "default": {"type": "text", "value": ""}, "group": "g"},
            {"key": "a", "kind": "text", "label": "A2", "default": {"type": "text", "value": ""}, "group": "g"}
        ]"#;
        assert!(serde_json::from_str::<Schema>(json).is_err());
    }
}
