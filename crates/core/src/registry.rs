//! Registry of widget descriptors
//!
//! Maps widget ids to their schema and renderer factory. Built-in widgets
//! register at startup; bundle-provided ones register after their manifest
//! resolves. Descriptors live for the whole process, there is no
//! unregistration.

use crate::error::{Result, StudioError};
use crate::widget::BoxedWidget;
use log::info;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use widget_studio_types::Schema;

/// Function that creates a fresh renderer instance for a widget
pub type WidgetFactory = Arc<dyn Fn() -> BoxedWidget + Send + Sync>;

/// A registered widget: identity, schema and renderer factory
#[derive(Clone)]
pub struct WidgetDescriptor {
    pub id: String,
    pub display_name: String,
    pub schema: Schema,
    factory: WidgetFactory,
}

impl WidgetDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        schema: Schema,
        factory: impl Fn() -> BoxedWidget + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            schema,
            factory: Arc::new(factory),
        }
    }

    /// Build a descriptor around an already-shared factory. Used by bundle
    /// loading, where derived widgets reuse their template's factory.
    pub fn with_factory(
        id: impl Into<String>,
        display_name: impl Into<String>,
        schema: Schema,
        factory: WidgetFactory,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            schema,
            factory,
        }
    }

    /// Instantiate a renderer with fresh ephemeral state
    pub fn instantiate(&self) -> BoxedWidget {
        (self.factory)()
    }

    /// Shared handle to the renderer factory
    pub fn factory(&self) -> WidgetFactory {
        Arc::clone(&self.factory)
    }
}

impl std::fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Picker-facing identity of a registered widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInfo {
    pub id: String,
    pub display_name: String,
}

/// Registry of widget descriptors, preserving registration order
pub struct Registry {
    descriptors: Vec<WidgetDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a widget descriptor under its unique id.
    ///
    /// A second registration under an existing id is rejected and the first
    /// descriptor is retained.
    pub fn register(&mut self, descriptor: WidgetDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(StudioError::DuplicateWidget(descriptor.id));
        }
        info!("registered widget `{}` ({})", descriptor.id, descriptor.display_name);
        self.index
            .insert(descriptor.id.clone(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: &str) -> Result<&WidgetDescriptor> {
        self.index
            .get(id)
            .map(|&i| &self.descriptors[i])
            .ok_or_else(|| StudioError::UnknownWidget(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All descriptors, in registration order
    pub fn list_all(&self) -> &[WidgetDescriptor] {
        &self.descriptors
    }

    /// Picker listing: id and display name per widget, registration order
    pub fn list_info(&self) -> Vec<WidgetInfo> {
        self.descriptors
            .iter()
            .map(|d| WidgetInfo {
                id: d.id.clone(),
                display_name: d.display_name.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry shared between the session, the bundle loader and startup
/// registration
pub type SharedRegistry = Arc<RwLock<Registry>>;

static GLOBAL_REGISTRY: Lazy<SharedRegistry> = Lazy::new(|| Arc::new(RwLock::new(Registry::new())));

/// Get the process-wide registry
pub fn global_registry() -> SharedRegistry {
    Arc::clone(&GLOBAL_REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;
    use widget_studio_types::{Configuration, FieldSpec, Interaction, Visual};

    struct Inert;

    impl Widget for Inert {
        fn apply_config(&mut self, _config: &Configuration) -> Result<()> {
            Ok(())
        }

        fn interact(&mut self, _interaction: Interaction) {}

        fn render(&self, _config: &Configuration) -> Result<Visual> {
            Ok(Visual::label("inert"))
        }
    }

    fn descriptor(id: &str) -> WidgetDescriptor {
        let schema =
            Schema::from_specs(vec![FieldSpec::text("title", "Title", id, "General")]).unwrap();
        WidgetDescriptor::new(id, format!("Widget {}", id), schema, || Box::new(Inert))
    }

    #[test]
    fn test_duplicate_registration_rejected_first_retained() {
        let mut registry = Registry::new();
        registry.register(descriptor("quiz")).unwrap();

        let mut second = descriptor("quiz");
        second.display_name = "Impostor".into();
        let err = registry.register(second).unwrap_err();
        assert_eq!(err, StudioError::DuplicateWidget("quiz".into()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("quiz").unwrap().display_name, "Widget quiz");
    }

    #[test]
    fn test_get_unregistered_fails_with_unknown_widget() {
        let registry = Registry::new();
        let err = registry.get("mystery").unwrap_err();
        assert_eq!(err, StudioError::UnknownWidget("mystery".into()));
    }

    #[test]
    fn test_list_all_in_registration_order() {
        let mut registry = Registry::new();
        for id in ["c", "a", "b"] {
            registry.register(descriptor(id)).unwrap();
        }
        let ids: Vec<&str> = registry.list_all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        let info = registry.list_info();
        assert_eq!(info[1].display_name, "Widget a");
    }
}
