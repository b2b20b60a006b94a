//! Countdown timer widget
//!
//! Wraps the [`CountdownClock`] state machine in the widget contract: a
//! heading, the clock face, a start/pause button and a reset button. The
//! clock position is ephemeral state; editing `duration` rebuilds it, title
//! and color edits leave it running.

use widget_studio_core::{Result, Widget, WidgetDescriptor};
use widget_studio_types::{
    Color, Configuration, CountdownClock, FieldSpec, Interaction, Schema, Visual,
};

pub fn descriptor() -> Result<WidgetDescriptor> {
    let schema = Schema::from_specs(vec![
        FieldSpec::text("title", "Title", "Break timer", "General"),
        FieldSpec::number("duration", "Duration (seconds)", 60.0, "General").constrained(
            5.0, 3600.0, 5.0,
        ),
        FieldSpec::color(
            "timerColor",
            "Timer color",
            Color::from_rgba8(0x1f, 0x29, 0x37, 0xff),
            "General",
        ),
    ])?;
    Ok(WidgetDescriptor::new("countdown", "Countdown", schema, || {
        Box::new(CountdownWidget::new())
    }))
}

/// Countdown renderer
pub struct CountdownWidget {
    clock: CountdownClock,
}

impl CountdownWidget {
    /// Start with an empty clock; the first `apply_config` installs the
    /// configured duration.
    pub fn new() -> Self {
        Self {
            clock: CountdownClock::new(0),
        }
    }
}

impl Default for CountdownWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for CountdownWidget {
    fn apply_config(&mut self, config: &Configuration) -> Result<()> {
        let duration = config.number("duration")? as u64;
        if duration != self.clock.duration() {
            self.clock.set_duration(duration);
        }
        Ok(())
    }

    fn interact(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::ToggleRun => self.clock.toggle(),
            Interaction::Reset => self.clock.reset(),
            _ => {}
        }
    }

    fn wants_tick(&self) -> bool {
        self.clock.is_running()
    }

    fn tick(&mut self) {
        self.clock.tick();
    }

    fn render(&self, config: &Configuration) -> Result<Visual> {
        let title = config.text("title")?;
        let timer_color = config.color("timerColor")?;

        let toggle_label = if self.clock.is_running() {
            "Pause"
        } else {
            "Start"
        };

        Ok(Visual::stack(
            None,
            vec![
                Visual::heading(title),
                Visual::Readout {
                    text: self.clock.display_string(),
                    color: Some(timer_color),
                },
                Visual::Button {
                    label: toggle_label.to_string(),
                    action: Interaction::ToggleRun,
                    enabled: true,
                    fill: None,
                    text_color: None,
                },
                Visual::Button {
                    label: "Reset".to_string(),
                    action: Interaction::Reset,
                    enabled: true,
                    fill: None,
                    text_color: None,
                },
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Schema, Configuration, CountdownWidget) {
        let descriptor = descriptor().unwrap();
        let schema = descriptor.schema.clone();
        let config = schema.defaults();
        let mut widget = CountdownWidget::new();
        widget.apply_config(&config).unwrap();
        (schema, config, widget)
    }

    fn readout(visual: &Visual) -> String {
        visual
            .walk()
            .into_iter()
            .find_map(|node| match node {
                Visual::Readout { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap()
    }

    fn toggle_label(visual: &Visual) -> String {
        match visual.buttons().first() {
            Some(Visual::Button { label, .. }) => (*label).clone(),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_first_apply_installs_the_configured_duration() {
        let (_, config, widget) = setup();
        assert!(!widget.wants_tick());
        let visual = widget.render(&config).unwrap();
        assert_eq!(readout(&visual), "01:00");
        assert_eq!(toggle_label(&visual), "Start");
    }

    #[test]
    fn test_toggle_runs_and_ticks_count_down() {
        let (_, config, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        assert!(widget.wants_tick());
        widget.tick();
        widget.tick();
        let visual = widget.render(&config).unwrap();
        assert_eq!(readout(&visual), "00:58");
        assert_eq!(toggle_label(&visual), "Pause");
    }

    #[test]
    fn test_pause_stops_wanting_ticks() {
        let (_, _, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        widget.tick();
        widget.interact(Interaction::ToggleRun);
        assert!(!widget.wants_tick());
    }

    #[test]
    fn test_reach_zero_then_toggle_restarts_full() {
        let (schema, config, mut widget) = setup();
        let config =
            widget_studio_core::store::set(&schema, &config, "duration", 5.0.into()).unwrap();
        widget.apply_config(&config).unwrap();

        widget.interact(Interaction::ToggleRun);
        for _ in 0..5 {
            widget.tick();
        }
        let visual = widget.render(&config).unwrap();
        assert_eq!(readout(&visual), "00:00");
        assert_eq!(toggle_label(&visual), "Start");
        assert!(!widget.wants_tick());

        widget.interact(Interaction::ToggleRun);
        assert!(widget.wants_tick());
        assert_eq!(readout(&widget.render(&config).unwrap()), "00:05");
    }

    #[test]
    fn test_duration_edit_rebuilds_the_clock() {
        let (schema, config, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        widget.tick();

        let edited =
            widget_studio_core::store::set(&schema, &config, "duration", 30.0.into()).unwrap();
        widget.apply_config(&edited).unwrap();

        assert!(!widget.wants_tick());
        assert_eq!(readout(&widget.render(&edited).unwrap()), "00:30");
    }

    #[test]
    fn test_title_edit_keeps_the_clock_running() {
        let (schema, config, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        widget.tick();

        let edited =
            widget_studio_core::store::set(&schema, &config, "title", "Lunch".into()).unwrap();
        widget.apply_config(&edited).unwrap();

        assert!(widget.wants_tick());
        assert_eq!(readout(&widget.render(&edited).unwrap()), "00:59");
    }

    #[test]
    fn test_reset_restores_full_duration_stopped() {
        let (_, config, mut widget) = setup();
        widget.interact(Interaction::ToggleRun);
        widget.tick();
        widget.interact(Interaction::Reset);

        assert!(!widget.wants_tick());
        assert_eq!(readout(&widget.render(&config).unwrap()), "01:00");
    }
}
