//! Bundle loading and registration
//!
//! Resolves a manifest from the local filesystem, validates every entry
//! against its template's schema and registers the derived descriptors in
//! manifest order. Any failure surfaces as a bundle load failure naming the
//! cause; entries registered before the failing one stay registered.

use crate::bundle::manifest::{BundleManifest, BundleWidget, BUNDLE_API_VERSION};
use crate::widgets::TEMPLATE_IDS;
use crate::SharedSession;
use log::{debug, info};
use std::path::{Path, PathBuf};
use widget_studio_core::{Registry, Result, SharedRegistry, StudioError, WidgetDescriptor};
use widget_studio_types::{FieldSpec, FieldValue, Schema};

/// Summary of one successful bundle load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBundle {
    pub name: String,
    /// Registered widget ids, in manifest order
    pub widget_ids: Vec<String>,
}

fn failure(message: String) -> StudioError {
    StudioError::BundleLoadFailure(message)
}

/// Read a manifest file and register its widgets.
///
/// Only the local-file transport is provided; callers with other transports
/// parse their bytes and use [`register_manifest`] directly.
pub async fn load_bundle(path: &Path, registry: &SharedRegistry) -> Result<LoadedBundle> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| failure(format!("reading {}: {}", path.display(), err)))?;
    let manifest: BundleManifest = serde_json::from_slice(&bytes)
        .map_err(|err| failure(format!("parsing {}: {}", path.display(), err)))?;
    register_manifest(manifest, registry)
}

/// Load each manifest in order, gating widget selection through the session
/// for the duration of every load.
pub async fn load_bundles(paths: &[PathBuf], registry: &SharedRegistry, session: &SharedSession) {
    for path in paths {
        session.write().await.begin_bundle_load();
        let outcome = load_bundle(path, registry).await;
        session
            .write()
            .await
            .complete_bundle_load(outcome.map(|_| ()));
    }
}

/// Validate a parsed manifest and register every widget it names.
pub fn register_manifest(manifest: BundleManifest, registry: &SharedRegistry) -> Result<LoadedBundle> {
    if manifest.api_version != BUNDLE_API_VERSION {
        return Err(failure(format!(
            "bundle `{}` requires api version {}, this build supports {}",
            manifest.name, manifest.api_version, BUNDLE_API_VERSION
        )));
    }

    let mut widget_ids = Vec::with_capacity(manifest.widgets.len());
    for entry in &manifest.widgets {
        let descriptor = derive_descriptor(entry, registry)
            .map_err(|cause| failure(format!("bundle `{}`: {}", manifest.name, cause)))?;

        let mut guard = write_lock(registry);
        guard
            .register(descriptor)
            .map_err(|err| failure(format!("bundle `{}`: {}", manifest.name, err)))?;
        widget_ids.push(entry.id.clone());
    }

    info!(
        "bundle `{}` v{} registered {} widget(s)",
        manifest.name,
        manifest.version,
        widget_ids.len()
    );
    Ok(LoadedBundle {
        name: manifest.name,
        widget_ids,
    })
}

/// Build the descriptor for one manifest entry: the template's factory with
/// the template's schema, defaults overridden per the entry. Errors are bare
/// cause strings; the caller adds the bundle context.
fn derive_descriptor(
    entry: &BundleWidget,
    registry: &SharedRegistry,
) -> std::result::Result<WidgetDescriptor, String> {
    if !TEMPLATE_IDS.contains(&entry.template.as_str()) {
        return Err(format!(
            "widget `{}`: unknown template `{}`",
            entry.id, entry.template
        ));
    }

    let (template_schema, factory) = {
        let guard = read_lock(registry);
        let template = guard.get(&entry.template).map_err(|_| {
            format!(
                "widget `{}`: template `{}` is not registered",
                entry.id, entry.template
            )
        })?;
        (template.schema.clone(), template.factory())
    };

    let mut specs: Vec<FieldSpec> = template_schema.fields().to_vec();
    for (key, value) in &entry.defaults {
        let spec = specs.iter_mut().find(|spec| spec.key == *key).ok_or_else(|| {
            format!(
                "widget `{}`: no field `{}` in template `{}`",
                entry.id, key, entry.template
            )
        })?;
        if !value.matches_kind(spec.kind) {
            return Err(format!(
                "widget `{}`: default for `{}` is {}, expected {}",
                entry.id,
                key,
                value.kind_name(),
                spec.kind
            ));
        }
        spec.default = match (value.clone(), spec.constraints) {
            (FieldValue::Number(n), Some(constraints)) => {
                let clamped = constraints.clamp(n);
                if clamped != n {
                    debug!("widget `{}`: clamped `{}` from {} to {}", entry.id, key, n, clamped);
                }
                FieldValue::Number(clamped)
            }
            (value, _) => value,
        };
    }

    let schema =
        Schema::from_specs(specs).map_err(|err| format!("widget `{}`: {}", entry.id, err))?;
    Ok(WidgetDescriptor::with_factory(
        &entry.id,
        &entry.display_name,
        schema,
        factory,
    ))
}

fn read_lock(registry: &SharedRegistry) -> std::sync::RwLockReadGuard<'_, Registry> {
    match registry.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock(registry: &SharedRegistry) -> std::sync::RwLockWriteGuard<'_, Registry> {
    match registry.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
