//! widget-studio: A schema-driven studio for small interactive widgets
//!
//! This library provides the application layer of widget-studio, including:
//! - Built-in widget implementations (quiz, flashcard, countdown)
//! - Bundle loading for third-party widget packs
//! - The background tick driver for time-based widgets
//! - Settings management
//! - The interactive shell front end

pub mod bundle;
pub mod driver;
pub mod settings;
pub mod shell;
pub mod widgets;

use std::sync::Arc;

use tokio::sync::RwLock;
use widget_studio_core::Session;

/// Session handle shared between the shell, the tick driver and bundle
/// loads. Shell code uses the blocking lock methods; async code awaits.
pub type SharedSession = Arc<RwLock<Session>>;

// Re-export commonly used types
pub use driver::TickDriver;
pub use settings::StudioSettings;
pub use shell::Shell;
