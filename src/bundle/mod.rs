//! Widget bundles
//!
//! Additional widgets arrive as JSON manifests that instantiate built-in
//! templates under new ids with overridden defaults. Loading is asynchronous
//! and registers into the shared registry; the session is notified around
//! each load so selection stays gated while a load is in flight.

mod loader;
mod manifest;

pub use loader::{load_bundle, load_bundles, register_manifest, LoadedBundle};
pub use manifest::{BundleManifest, BundleWidget, BUNDLE_API_VERSION};
