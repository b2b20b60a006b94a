//! Built-in widgets
//!
//! Each widget module exposes a `descriptor()` building its schema and
//! renderer factory; the renderers implement the generic `Widget` contract
//! from the core crate.

pub mod countdown;
pub mod flashcard;
pub mod quiz;

pub use countdown::CountdownWidget;
pub use flashcard::FlashcardWidget;
pub use quiz::QuizWidget;

use widget_studio_core::{Result, SharedRegistry};

/// Ids bundle manifests may name as templates
pub const TEMPLATE_IDS: &[&str] = &["quiz", "flashcard", "countdown"];

/// Register all built-in widgets with the given registry
pub fn register_all(registry: &SharedRegistry) -> Result<()> {
    let mut registry = match registry.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    registry.register(quiz::descriptor()?)?;
    registry.register(flashcard::descriptor()?)?;
    registry.register(countdown::descriptor()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use widget_studio_core::Registry;

    #[test]
    fn test_register_all_in_picker_order() {
        let registry: SharedRegistry = Arc::new(RwLock::new(Registry::new()));
        register_all(&registry).unwrap();

        let guard = registry.read().unwrap();
        let ids: Vec<&str> = guard.list_all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, TEMPLATE_IDS);
    }

    #[test]
    fn test_registering_twice_is_a_duplicate() {
        let registry: SharedRegistry = Arc::new(RwLock::new(Registry::new()));
        register_all(&registry).unwrap();
        assert!(register_all(&registry).is_err());
    }

    #[test]
    fn test_descriptors_instantiate_fresh_renderers() {
        let registry: SharedRegistry = Arc::new(RwLock::new(Registry::new()));
        register_all(&registry).unwrap();

        let guard = registry.read().unwrap();
        for descriptor in guard.list_all() {
            let mut widget = descriptor.instantiate();
            let config = descriptor.schema.defaults();
            widget.apply_config(&config).unwrap();
            widget.render(&config).unwrap();
        }
    }
}
