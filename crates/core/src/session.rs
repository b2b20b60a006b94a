//! Session controller
//!
//! Owns the picker/configuring state machine and the active widget's
//! configuration. All mutation flows through here one call at a time: edits
//! go through the store, interactions and heartbeats go to the renderer, and
//! every change produces a fresh visual tree. Exiting discards the
//! configuration and the renderer instance; nothing survives back to the
//! picker.

use crate::controls::{generate_controls, ControlDescriptor, EditTarget};
use crate::error::{Result, StudioError};
use crate::registry::{SharedRegistry, WidgetInfo};
use crate::store;
use crate::widget::BoxedWidget;
use log::{debug, info, trace, warn};
use uuid::Uuid;
use widget_studio_types::{Configuration, FieldValue, Interaction, Schema, SchemaError, Visual};

/// Progress of the most recent bundle load, tracked for selection gating
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BundleState {
    /// No load in flight
    #[default]
    Idle,
    /// A load is in flight; selection is refused until it completes
    Loading,
    /// The last load failed; already-registered widgets stay selectable
    Failed(String),
}

/// The selected widget and everything owned on its behalf
struct ActiveWidget {
    id: String,
    /// Correlates log lines of one selection; a reselection gets a new id
    instance: Uuid,
    schema: Schema,
    config: Configuration,
    renderer: BoxedWidget,
    visual: Visual,
}

/// Orchestrates widget selection, configuration edits, interactions and
/// heartbeats against the registry.
///
/// Exactly one writer mutates a session at a time; wrap it in a lock when the
/// shell, a tick driver and a bundle loader share it.
pub struct Session {
    registry: SharedRegistry,
    active: Option<ActiveWidget>,
    bundle: BundleState,
}

impl Session {
    /// Create a session in picker mode over the given registry
    pub fn new(registry: SharedRegistry) -> Self {
        Self {
            registry,
            active: None,
            bundle: BundleState::Idle,
        }
    }

    /// Whether a widget is currently selected
    pub fn is_configuring(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the selected widget, if any
    pub fn active_widget_id(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.id.as_str())
    }

    /// Picker listing: id and display name per registered widget, in
    /// registration order
    pub fn available_widgets(&self) -> Vec<WidgetInfo> {
        match self.registry.read() {
            Ok(registry) => registry.list_info(),
            Err(poisoned) => poisoned.into_inner().list_info(),
        }
    }

    pub fn bundle_state(&self) -> &BundleState {
        &self.bundle
    }

    /// Select a widget: derive its default configuration, instantiate a
    /// fresh renderer and render once.
    ///
    /// Fails with [`StudioError::BundlePending`] while a bundle load is in
    /// flight and with [`StudioError::UnknownWidget`] for an unregistered id;
    /// both leave the session in its previous state. Selecting while already
    /// configuring discards the current widget first.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.bundle == BundleState::Loading {
            return Err(StudioError::BundlePending);
        }

        let (schema, mut renderer) = {
            let registry = match self.registry.read() {
                Ok(registry) => registry,
                Err(poisoned) => poisoned.into_inner(),
            };
            let descriptor = registry.get(id)?;
            (descriptor.schema.clone(), descriptor.instantiate())
        };

        if let Some(previous) = self.active.take() {
            debug!("[{}] replaced by selection of `{}`", previous.instance, id);
        }

        let instance = Uuid::new_v4();
        let config = schema.defaults();
        renderer.apply_config(&config)?;
        let visual = renderer.render(&config)?;

        info!("[{}] selected widget `{}`", instance, id);
        self.active = Some(ActiveWidget {
            id: id.to_string(),
            instance,
            schema,
            config,
            renderer,
            visual,
        });
        Ok(())
    }

    /// Return to the picker, discarding the configuration and the renderer
    pub fn exit(&mut self) {
        if let Some(active) = self.active.take() {
            info!("[{}] exited widget `{}`", active.instance, active.id);
        }
    }

    /// Apply one edit to the active configuration and re-render.
    ///
    /// The old configuration is replaced, never mutated; a failed edit leaves
    /// configuration and visual untouched.
    pub fn edit(&mut self, target: &EditTarget, value: FieldValue) -> Result<()> {
        let active = self.active.as_mut().ok_or(StudioError::NoActiveWidget)?;

        let next = match target {
            EditTarget::Field { key } => store::set(&active.schema, &active.config, key, value)?,
            EditTarget::ListItem { key, index } => {
                let item = Self::expect_text(key, value)?;
                store::set_list_item(&active.schema, &active.config, key, *index, item)?
            }
            EditTarget::ListAppend { key } => {
                let item = Self::expect_text(key, value)?;
                store::append_list_item(&active.schema, &active.config, key, item)?
            }
        };

        debug!("[{}] edited `{}`", active.instance, target.key());
        active.renderer.apply_config(&next)?;
        active.visual = active.renderer.render(&next)?;
        active.config = next;
        Ok(())
    }

    /// Forward an interaction to the active renderer and re-render
    pub fn interact(&mut self, interaction: Interaction) -> Result<()> {
        let active = self.active.as_mut().ok_or(StudioError::NoActiveWidget)?;
        debug!("[{}] interaction {:?}", active.instance, interaction);
        active.renderer.interact(interaction);
        active.visual = active.renderer.render(&active.config)?;
        Ok(())
    }

    /// Deliver one heartbeat.
    ///
    /// A no-op unless the active renderer currently wants ticks, so the
    /// driver can fire unconditionally in every session state.
    pub fn tick(&mut self) -> Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        if !active.renderer.wants_tick() {
            return Ok(());
        }
        trace!("[{}] heartbeat", active.instance);
        active.renderer.tick();
        active.visual = active.renderer.render(&active.config)?;
        Ok(())
    }

    /// Control descriptors for the active schema and configuration
    pub fn controls(&self) -> Result<Vec<ControlDescriptor>> {
        let active = self.active.as_ref().ok_or(StudioError::NoActiveWidget)?;
        generate_controls(&active.schema, &active.config)
    }

    /// The most recently rendered visual tree
    pub fn visual(&self) -> Result<&Visual> {
        self.active
            .as_ref()
            .map(|active| &active.visual)
            .ok_or(StudioError::NoActiveWidget)
    }

    /// Current value snapshot of the active configuration
    pub fn configuration(&self) -> Result<&Configuration> {
        self.active
            .as_ref()
            .map(|active| &active.config)
            .ok_or(StudioError::NoActiveWidget)
    }

    /// Mark a bundle load as in flight, disabling selection until
    /// [`Session::complete_bundle_load`] is called
    pub fn begin_bundle_load(&mut self) {
        info!("bundle load started");
        self.bundle = BundleState::Loading;
    }

    /// Record the outcome of the in-flight bundle load and re-enable
    /// selection
    pub fn complete_bundle_load(&mut self, outcome: Result<()>) {
        self.bundle = match outcome {
            Ok(()) => {
                info!("bundle load finished");
                BundleState::Idle
            }
            Err(err) => {
                warn!("bundle load failed: {}", err);
                BundleState::Failed(err.to_string())
            }
        };
    }

    fn expect_text(key: &str, value: FieldValue) -> Result<String> {
        match value {
            FieldValue::Text(item) => Ok(item),
            other => Err(StudioError::SchemaMismatch(SchemaError::WrongKind {
                key: key.to_string(),
                expected: "text",
                found: other.kind_name(),
            })),
        }
    }
}
