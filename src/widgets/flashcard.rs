//! Two-sided flashcard widget
//!
//! One card-sized button showing the front or back face; activating it flips
//! the card. Editing either face snaps the card back to the front so a new
//! pair never starts revealed.

use widget_studio_core::{Result, Widget, WidgetDescriptor};
use widget_studio_types::{Color, Configuration, FieldSpec, Interaction, Schema, Visual};

pub fn descriptor() -> Result<WidgetDescriptor> {
    let schema = Schema::from_specs(vec![
        FieldSpec::text("front", "Front", "Hello", "Content"),
        FieldSpec::long_text("back", "Back", "Xin chào", "Content"),
        FieldSpec::color(
            "cardColor",
            "Card front",
            Color::from_rgba8(0x63, 0x66, 0xf1, 0xff),
            "Appearance",
        ),
        FieldSpec::color(
            "backColor",
            "Card back",
            Color::from_rgba8(0x43, 0x38, 0xca, 0xff),
            "Appearance",
        ),
        FieldSpec::color(
            "textColor",
            "Text",
            Color::from_rgba8(0xff, 0xff, 0xff, 0xff),
            "Appearance",
        ),
    ])?;
    Ok(WidgetDescriptor::new("flashcard", "Flashcard", schema, || {
        Box::new(FlashcardWidget::new())
    }))
}

/// Flashcard renderer
pub struct FlashcardWidget {
    /// Last seen `(front, back)` pair, for detecting content changes
    faces: Option<(String, String)>,
    flipped: bool,
}

impl FlashcardWidget {
    pub fn new() -> Self {
        Self {
            faces: None,
            flipped: false,
        }
    }
}

impl Default for FlashcardWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for FlashcardWidget {
    fn apply_config(&mut self, config: &Configuration) -> Result<()> {
        let front = config.text("front")?;
        let back = config.text("back")?;
        let changed = match &self.faces {
            Some((f, b)) => f != front || b != back,
            None => true,
        };
        if changed {
            self.faces = Some((front.to_string(), back.to_string()));
            self.flipped = false;
        }
        Ok(())
    }

    fn interact(&mut self, interaction: Interaction) {
        if interaction == Interaction::Flip {
            self.flipped = !self.flipped;
        }
    }

    fn render(&self, config: &Configuration) -> Result<Visual> {
        let (face, fill) = if self.flipped {
            (config.text("back")?, config.color("backColor")?)
        } else {
            (config.text("front")?, config.color("cardColor")?)
        };
        let text_color = config.color("textColor")?;

        Ok(Visual::stack(
            None,
            vec![
                Visual::Button {
                    label: face.to_string(),
                    action: Interaction::Flip,
                    enabled: true,
                    fill: Some(fill),
                    text_color: Some(text_color),
                },
                Visual::label("Click the card to flip"),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Schema, Configuration, FlashcardWidget) {
        let descriptor = descriptor().unwrap();
        let schema = descriptor.schema.clone();
        let config = schema.defaults();
        let mut widget = FlashcardWidget::new();
        widget.apply_config(&config).unwrap();
        (schema, config, widget)
    }

    fn card(visual: &Visual) -> (String, Option<Color>) {
        match visual.buttons().first() {
            Some(Visual::Button { label, fill, .. }) => (label.clone(), *fill),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_starts_on_the_front_face() {
        let (_, config, widget) = setup();
        let visual = widget.render(&config).unwrap();
        let (label, fill) = card(&visual);
        assert_eq!(label, "Hello");
        assert_eq!(fill, config.color("cardColor").ok());
    }

    #[test]
    fn test_flip_shows_the_back_and_flips_again() {
        let (_, config, mut widget) = setup();
        widget.interact(Interaction::Flip);
        let (label, fill) = card(&widget.render(&config).unwrap());
        assert_eq!(label, "Xin chào");
        assert_eq!(fill, config.color("backColor").ok());

        widget.interact(Interaction::Flip);
        assert_eq!(card(&widget.render(&config).unwrap()).0, "Hello");
    }

    #[test]
    fn test_face_edit_resets_to_the_front() {
        let (schema, config, mut widget) = setup();
        widget.interact(Interaction::Flip);

        let edited =
            widget_studio_core::store::set(&schema, &config, "back", "Bonjour".into()).unwrap();
        widget.apply_config(&edited).unwrap();

        assert_eq!(card(&widget.render(&edited).unwrap()).0, "Hello");
    }

    #[test]
    fn test_appearance_edit_keeps_the_flip() {
        let (schema, config, mut widget) = setup();
        widget.interact(Interaction::Flip);

        let edited = widget_studio_core::store::set(
            &schema,
            &config,
            "textColor",
            Color::from_rgba8(0x00, 0x00, 0x00, 0xff).into(),
        )
        .unwrap();
        widget.apply_config(&edited).unwrap();

        assert_eq!(card(&widget.render(&edited).unwrap()).0, "Xin chào");
    }

    #[test]
    fn test_unrelated_interactions_are_ignored() {
        let (_, config, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        widget.interact(Interaction::Select { index: 0 });
        assert_eq!(card(&widget.render(&config).unwrap()).0, "Hello");
    }

    #[test]
    fn test_hint_label_is_present() {
        let (_, config, widget) = setup();
        let visual = widget.render(&config).unwrap();
        assert!(visual.walk().iter().any(|node| matches!(
            node,
            Visual::Label { text, .. } if text == "Click the card to flip"
        )));
    }
}
