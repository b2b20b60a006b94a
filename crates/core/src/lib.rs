//! widget-studio-core: Engine for the widget-studio configuration/render loop.
//!
//! This crate contains the engine around the shared data types: typed error
//! kinds, the configuration store operations, the control generator, the
//! Widget trait, the widget registry and the session controller. It has no
//! UI, terminal or async dependencies; front ends and loaders live in the
//! application crate.

mod controls;
mod error;
mod registry;
mod session;
pub mod store;
mod widget;

pub use controls::{
    generate_controls, group_controls, ControlDescriptor, ControlKind, EditTarget, ListItemControl,
};
pub use error::{Result, StudioError};
pub use registry::{
    global_registry, Registry, SharedRegistry, WidgetDescriptor, WidgetFactory, WidgetInfo,
};
pub use session::{BundleState, Session};
pub use widget::{BoxedWidget, Widget};

// Re-export types used in trait signatures for convenience
pub use widget_studio_types::{Configuration, FieldValue, Interaction, Schema, Visual};
