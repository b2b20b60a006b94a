//! Widget bundle manifest format
//!
//! A bundle is a JSON document naming widgets to derive from built-in
//! templates, each under a new id and optionally with overridden schema
//! defaults. Manifests carry data only; no executable code travels in a
//! bundle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use widget_studio_types::FieldValue;

/// Manifest format version this build understands
pub const BUNDLE_API_VERSION: u32 = 1;

/// Parsed bundle manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleManifest {
    pub name: String,
    pub version: String,
    pub api_version: u32,
    pub widgets: Vec<BundleWidget>,
}

/// One manifest entry: a template instantiated under a new identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleWidget {
    pub id: String,
    pub display_name: String,
    /// Built-in widget whose schema and renderer this entry reuses
    pub template: String,
    /// Schema default overrides, keyed by field, in manifest order
    #[serde(default)]
    pub defaults: IndexMap<String, FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_the_documented_shape() {
        let json = r#"{
            "name": "geography-pack",
            "version": "1.0.0",
            "apiVersion": 1,
            "widgets": [
                {
                    "id": "capitals-quiz",
                    "displayName": "Capitals Quiz",
                    "template": "quiz",
                    "defaults": {
                        "question": { "type": "text", "value": "Capital of Japan?" }
                    }
                }
            ]
        }"#;
        let manifest: BundleManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.name, "geography-pack");
        assert_eq!(manifest.api_version, BUNDLE_API_VERSION);
        assert_eq!(manifest.widgets.len(), 1);

        let widget = &manifest.widgets[0];
        assert_eq!(widget.id, "capitals-quiz");
        assert_eq!(widget.template, "quiz");
        assert_eq!(
            widget.defaults.get("question"),
            Some(&FieldValue::from("Capital of Japan?"))
        );
    }

    #[test]
    fn test_defaults_are_optional() {
        let json = r#"{
            "name": "bare",
            "version": "0.1.0",
            "apiVersion": 1,
            "widgets": [
                { "id": "t", "displayName": "T", "template": "countdown" }
            ]
        }"#;
        let manifest: BundleManifest = serde_json::from_str(json).unwrap();
        assert!(manifest.widgets[0].defaults.is_empty());
    }

    #[test]
    fn test_rejects_malformed_override_values() {
        let json = r#"{
            "name": "bad",
            "version": "0.1.0",
            "apiVersion": 1,
            "widgets": [
                {
                    "id": "t",
                    "displayName": "T",
                    "template": "quiz",
                    "defaults": { "question": "not tagged" }
                }
            ]
        }"#;
        assert!(serde_json::from_str::<BundleManifest>(json).is_err());
    }
}
