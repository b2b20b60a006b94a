//! Control descriptor generation
//!
//! Maps a schema plus its live configuration into an ordered sequence of
//! descriptors a front end can turn into concrete form controls. Descriptors
//! are pure data; an edit made through one is routed back by applying its
//! `EditTarget` via the session's `edit`.

use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};
use widget_studio_types::{Configuration, FieldKind, FieldValue, NumericConstraints, Schema, SchemaError};

/// Address within the configuration an edit applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditTarget {
    /// Replace the whole value of `key`
    Field { key: String },
    /// Replace element `index` of the list at `key`
    ListItem { key: String, index: usize },
    /// Append an element to the list at `key`
    ListAppend { key: String },
}

impl EditTarget {
    pub fn field(key: impl Into<String>) -> Self {
        EditTarget::Field { key: key.into() }
    }

    pub fn key(&self) -> &str {
        match self {
            EditTarget::Field { key }
            | EditTarget::ListItem { key, .. }
            | EditTarget::ListAppend { key } => key,
        }
    }
}

/// One editable element of a list field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemControl {
    pub index: usize,
    pub value: String,
    pub target: EditTarget,
}

/// Concrete control shape a front end should render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ControlKind {
    /// Single-line text input
    TextInput,
    /// Multi-line text input
    TextArea,
    /// Numeric input, carrying the range and step hint when bounded
    NumberInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        constraints: Option<NumericConstraints>,
    },
    /// Hex color swatch
    ColorSwatch,
    /// Per-element inputs plus an append affordance
    ListEditor {
        items: Vec<ListItemControl>,
        append: EditTarget,
    },
}

/// Everything needed to render and wire one field's control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    pub key: String,
    pub label: String,
    pub group: String,
    /// Current value at generation time
    pub value: FieldValue,
    pub control: ControlKind,
    /// Whole-field edit target; list elements carry their own targets
    pub target: EditTarget,
}

/// Build one descriptor per schema field, in schema order, reading current
/// values from `config`.
pub fn generate_controls(
    schema: &Schema,
    config: &Configuration,
) -> Result<Vec<ControlDescriptor>> {
    schema
        .fields()
        .iter()
        .map(|spec| {
            let value = config
                .get(&spec.key)
                .cloned()
                .ok_or_else(|| SchemaError::MissingField(spec.key.clone()))?;
            if !value.matches_kind(spec.kind) {
                return Err(StudioError::SchemaMismatch(SchemaError::WrongKind {
                    key: spec.key.clone(),
                    expected: spec.kind.name(),
                    found: value.kind_name(),
                }));
            }

            let control = match spec.kind {
                FieldKind::Text => ControlKind::TextInput,
                FieldKind::LongText => ControlKind::TextArea,
                FieldKind::Number => ControlKind::NumberInput {
                    constraints: spec.constraints,
                },
                FieldKind::Color => ControlKind::ColorSwatch,
                FieldKind::List => {
                    let items = value
                        .as_list()
                        .unwrap_or_default()
                        .iter()
                        .enumerate()
                        .map(|(index, item)| ListItemControl {
                            index,
                            value: item.clone(),
                            target: EditTarget::ListItem {
                                key: spec.key.clone(),
                                index,
                            },
                        })
                        .collect();
                    ControlKind::ListEditor {
                        items,
                        append: EditTarget::ListAppend {
                            key: spec.key.clone(),
                        },
                    }
                }
            };

            Ok(ControlDescriptor {
                key: spec.key.clone(),
                label: spec.label.clone(),
                group: spec.group.clone(),
                value,
                control,
                target: EditTarget::field(&spec.key),
            })
        })
        .collect()
}

/// Partition generated controls into `(group, controls)` sections, groups
/// ordered by first appearance.
pub fn group_controls<'a>(
    controls: &'a [ControlDescriptor],
) -> Vec<(&'a str, Vec<&'a ControlDescriptor>)> {
    let mut sections: Vec<(&str, Vec<&ControlDescriptor>)> = Vec::new();
    for control in controls {
        match sections.iter_mut().find(|(group, _)| *group == control.group) {
            Some((_, members)) => members.push(control),
            None => sections.push((&control.group, vec![control])),
        }
    }
    sections
}
