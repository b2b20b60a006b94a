//! Multiple-choice quiz widget
//!
//! Renders one question with a button per answer option. Choosing an answer
//! disables the options, recolors the chosen button by correctness and shows
//! a feedback banner. The choice is ephemeral: editing `question` clears it,
//! appearance edits leave it alone.

use widget_studio_core::{Result, Widget, WidgetDescriptor};
use widget_studio_types::{Color, Configuration, FieldSpec, Interaction, Schema, Tone, Visual};

fn correct_fill() -> Color {
    Color::from_rgba8(0x10, 0xb9, 0x81, 0xff)
}

fn wrong_fill() -> Color {
    Color::from_rgba8(0xef, 0x44, 0x44, 0xff)
}

/// Descriptor for the built-in quiz widget.
///
/// `correctIndex` keeps a fixed 0..3 range even though `options` can grow
/// past four entries; an index past the list end never matches a chosen
/// option.
pub fn descriptor() -> Result<WidgetDescriptor> {
    let schema = Schema::from_specs(vec![
        FieldSpec::text(
            "question",
            "Question",
            "What is the capital of France?",
            "Content",
        ),
        FieldSpec::list(
            "options",
            "Options",
            &["Paris", "London", "Berlin", "Madrid"],
            "Content",
        ),
        FieldSpec::number("correctIndex", "Correct answer", 0.0, "Content")
            .constrained(0.0, 3.0, 1.0),
        FieldSpec::color(
            "backgroundColor",
            "Background",
            Color::from_rgba8(0xff, 0xff, 0xff, 0xff),
            "Appearance",
        ),
        FieldSpec::color(
            "buttonColor",
            "Button color",
            Color::from_rgba8(0x4f, 0x46, 0xe5, 0xff),
            "Appearance",
        ),
    ])?;
    Ok(WidgetDescriptor::new("quiz", "Quiz", schema, || {
        Box::new(QuizWidget::new())
    }))
}

/// Quiz renderer
pub struct QuizWidget {
    /// Last seen question text, for detecting content changes
    question: Option<String>,
    /// Index of the chosen option; `Some` also means the result is shown
    selected: Option<usize>,
}

impl QuizWidget {
    pub fn new() -> Self {
        Self {
            question: None,
            selected: None,
        }
    }
}

impl Default for QuizWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for QuizWidget {
    fn apply_config(&mut self, config: &Configuration) -> Result<()> {
        let question = config.text("question")?;
        if self.question.as_deref() != Some(question) {
            self.question = Some(question.to_string());
            self.selected = None;
        }
        Ok(())
    }

    fn interact(&mut self, interaction: Interaction) {
        if let Interaction::Select { index } = interaction {
            // first choice wins; the result stays up until the question changes
            if self.selected.is_none() {
                self.selected = Some(index);
            }
        }
    }

    fn render(&self, config: &Configuration) -> Result<Visual> {
        let question = config.text("question")?;
        let options = config.list("options")?;
        let correct = config.number("correctIndex")? as usize;
        let background = config.color("backgroundColor")?;
        let button_color = config.color("buttonColor")?;

        let mut children = vec![Visual::heading(question)];
        for (index, option) in options.iter().enumerate() {
            if option.is_empty() {
                continue;
            }
            let fill = match self.selected {
                Some(chosen) if chosen == index => {
                    if index == correct {
                        correct_fill()
                    } else {
                        wrong_fill()
                    }
                }
                _ => button_color,
            };
            children.push(Visual::Button {
                label: option.clone(),
                action: Interaction::Select { index },
                enabled: self.selected.is_none(),
                fill: Some(fill),
                text_color: None,
            });
        }

        if let Some(chosen) = self.selected {
            let (text, tone) = if chosen == correct {
                ("Correct!", Tone::Positive)
            } else {
                ("Wrong!", Tone::Negative)
            };
            children.push(Visual::Banner {
                text: text.to_string(),
                tone,
            });
        }

        Ok(Visual::stack(Some(background), children))
    }
}
