//! Configuration store update operations
//!
//! Updates are referentially transparent: each operation returns a new
//! `Configuration` and leaves the input untouched, so the caller swaps its
//! held reference and in-flight readers of the old value never observe a
//! partial write.

use crate::error::{Result, StudioError};
use log::debug;
use widget_studio_types::{Configuration, FieldKind, FieldValue, Schema, SchemaError};

/// Replace the value of `key`, validating kind and applying the numeric
/// clamp policy: values of bounded number fields are clamped to
/// `[min, max]`, unbounded number fields accept any value.
pub fn set(
    schema: &Schema,
    config: &Configuration,
    key: &str,
    value: FieldValue,
) -> Result<Configuration> {
    let spec = schema
        .get(key)
        .ok_or_else(|| SchemaError::MissingField(key.to_string()))?;
    if !value.matches_kind(spec.kind) {
        return Err(StudioError::SchemaMismatch(SchemaError::WrongKind {
            key: key.to_string(),
            expected: spec.kind.name(),
            found: value.kind_name(),
        }));
    }

    let value = match (value, spec.constraints) {
        (FieldValue::Number(n), Some(constraints)) => {
            let clamped = constraints.clamp(n);
            if clamped != n {
                debug!("clamped `{}` from {} to {}", key, n, clamped);
            }
            FieldValue::Number(clamped)
        }
        (value, _) => value,
    };

    let mut next = config.clone();
    next.insert(key, value);
    Ok(next)
}

/// Replace one element of a list field. `index` must address an existing
/// element.
pub fn set_list_item(
    schema: &Schema,
    config: &Configuration,
    key: &str,
    index: usize,
    value: impl Into<String>,
) -> Result<Configuration> {
    let mut items = list_field(schema, config, key)?.to_vec();
    if index >= items.len() {
        return Err(StudioError::SchemaMismatch(SchemaError::IndexOutOfBounds {
            key: key.to_string(),
            index,
            len: items.len(),
        }));
    }
    items[index] = value.into();

    let mut next = config.clone();
    next.insert(key, FieldValue::List(items));
    Ok(next)
}

/// Append an element to a list field; always valid for list fields.
pub fn append_list_item(
    schema: &Schema,
    config: &Configuration,
    key: &str,
    value: impl Into<String>,
) -> Result<Configuration> {
    let mut items = list_field(schema, config, key)?.to_vec();
    items.push(value.into());

    let mut next = config.clone();
    next.insert(key, FieldValue::List(items));
    Ok(next)
}

fn list_field<'a>(
    schema: &Schema,
    config: &'a Configuration,
    key: &str,
) -> Result<&'a [String]> {
    let spec = schema
        .get(key)
        .ok_or_else(|| SchemaError::MissingField(key.to_string()))?;
    if spec.kind != FieldKind::List {
        return Err(StudioError::SchemaMismatch(SchemaError::WrongKind {
            key: key.to_string(),
            expected: "list",
            found: spec.kind.name(),
        }));
    }
    Ok(config.list(key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use widget_studio_types::{Color, FieldSpec};

    fn schema() -> Schema {
        Schema::from_specs(vec![
            FieldSpec::text("title", "Title", "Break timer", "General"),
            FieldSpec::number("duration", "Duration (seconds)", 60.0, "General")
                .constrained(5.0, 3600.0, 5.0),
            FieldSpec::color(
                "timerColor",
                "Timer color",
                Color::from_rgba8(0x1f, 0x29, 0x37, 0xff),
                "General",
            ),
            FieldSpec::list("options", "Options", &["a", "b", "c"], "General"),
        ])
        .unwrap()
    }

    #[test]
    fn test_set_changes_only_the_target_key() {
        let schema = schema();
        let config = schema.defaults();
        let updated = set(&schema, &config, "title", FieldValue::from("Focus")).unwrap();

        assert_eq!(updated.text("title").unwrap(), "Focus");
        for (key, value) in config.iter() {
            if key != "title" {
                assert_eq!(updated.get(key), Some(value), "key {} changed", key);
            }
        }
        // the input is untouched
        assert_eq!(config.text("title").unwrap(), "Break timer");
    }

    #[test]
    fn test_numeric_clamp_low_and_high() {
        let schema = schema();
        let config = schema.defaults();

        let low = set(&schema, &config, "duration", FieldValue::Number(-5.0)).unwrap();
        assert_eq!(low.number("duration").unwrap(), 5.0);

        let high = set(&schema, &config, "duration", FieldValue::Number(99999.0)).unwrap();
        assert_eq!(high.number("duration").unwrap(), 3600.0);
    }

    #[test]
    fn test_unconstrained_numbers_pass_through() {
        let schema = Schema::from_specs(vec![FieldSpec::number("n", "N", 0.0, "g")]).unwrap();
        let config = schema.defaults();
        let updated = set(&schema, &config, "n", FieldValue::Number(-123456.0)).unwrap();
        assert_eq!(updated.number("n").unwrap(), -123456.0);
    }

    #[test]
    fn test_wrong_kind_and_unknown_key_rejected() {
        let schema = schema();
        let config = schema.defaults();

        let err = set(&schema, &config, "duration", FieldValue::from("sixty")).unwrap_err();
        assert!(matches!(err, StudioError::SchemaMismatch(_)));

        let err = set(&schema, &config, "nope", FieldValue::from("x")).unwrap_err();
        assert!(matches!(err, StudioError::SchemaMismatch(_)));
    }

    #[test]
    fn test_list_item_update_and_bounds() {
        let schema = schema();
        let config = schema.defaults();

        let updated = set_list_item(&schema, &config, "options", 1, "beta").unwrap();
        assert_eq!(updated.list("options").unwrap(), ["a", "beta", "c"]);
        assert_eq!(config.list("options").unwrap(), ["a", "b", "c"]);

        let err = set_list_item(&schema, &config, "options", 3, "x").unwrap_err();
        assert!(matches!(err, StudioError::SchemaMismatch(_)));
    }

    #[test]
    fn test_append_grows_by_one() {
        let schema = schema();
        let config = schema.defaults();
        let updated = append_list_item(&schema, &config, "options", "d").unwrap();
        assert_eq!(updated.list("options").unwrap(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_list_ops_reject_non_list_fields() {
        let schema = schema();
        let config = schema.defaults();
        assert!(append_list_item(&schema, &config, "title", "x").is_err());
        assert!(set_list_item(&schema, &config, "duration", 0, "x").is_err());
    }
}
