//! Engine error kinds

use thiserror::Error;
use widget_studio_types::SchemaError;

/// Everything the engine can refuse to do, by kind.
///
/// The session controller is the sole authority for presenting these to the
/// user; lower components return them without printing or panicking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudioError {
    /// A value does not fit its field's declared kind or shape
    #[error("schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaError),

    /// Registry lookup miss
    #[error("unknown widget `{0}`")]
    UnknownWidget(String),

    /// Second registration under an already-taken id
    #[error("widget `{0}` is already registered")]
    DuplicateWidget(String),

    /// A widget bundle could not be loaded
    #[error("widget bundle failed to load: {0}")]
    BundleLoadFailure(String),

    /// Selection attempted while a bundle load is still in flight
    #[error("a widget bundle is still loading")]
    BundlePending,

    /// Edit or interaction routed to a session in picker mode
    #[error("no active widget")]
    NoActiveWidget,
}

pub type Result<T> = std::result::Result<T, StudioError>;
