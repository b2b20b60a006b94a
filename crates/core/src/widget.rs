//! Widget behavior trait

use crate::error::Result;
use widget_studio_types::{Configuration, Interaction, Visual};

/// A configurable, renderable widget behavior.
///
/// Rendering is pure with respect to the configuration; the only other thing
/// an implementation may consult is its own ephemeral interaction state
/// (selection, flip, clock position). That state is reset inside
/// `apply_config` whenever the content-relevant fields change, so stale
/// interaction state is never shown against a new configuration.
pub trait Widget: Send + Sync {
    /// Receive the full (possibly updated) configuration before the next
    /// render, applying the widget's reset rules.
    fn apply_config(&mut self, config: &Configuration) -> Result<()>;

    /// React to a front-end interaction. Widgets ignore interactions they
    /// do not understand.
    fn interact(&mut self, interaction: Interaction);

    /// Whether the widget currently needs one-second heartbeats
    fn wants_tick(&self) -> bool {
        false
    }

    /// Advance one second of internal time
    fn tick(&mut self) {}

    /// Produce the visual tree for the given configuration
    fn render(&self, config: &Configuration) -> Result<Visual>;
}

/// Boxed widget renderer instance
pub type BoxedWidget = Box<dyn Widget>;
