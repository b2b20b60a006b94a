//! widget-studio-types: Shared data types for the widget-studio engine.
//!
//! This crate contains pure data types (field specs, tagged values, schemas,
//! configurations, the visual output tree, the countdown clock) shared across
//! all widget-studio crates. These types have no UI, terminal or async
//! dependencies, making them suitable as a foundation layer.

pub mod color;
pub mod field;
pub mod schema;
pub mod timer;
pub mod value;
pub mod visual;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, ParseColorError};
pub use field::{FieldKind, FieldSpec, NumericConstraints};
pub use schema::{Configuration, Schema, SchemaError};
pub use timer::{ClockState, CountdownClock};
pub use value::FieldValue;
pub use visual::{Interaction, Tone, Visual};
