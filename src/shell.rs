//! Line-oriented terminal front end
//!
//! The thinnest consumer of the session API: lists what the registry offers,
//! prints visual trees and control sections as indented text and routes
//! typed commands back as selections, edits and interactions. Buttons are
//! numbered in display order; `tap <n>` activates them. No widget logic
//! lives here.

use crate::SharedSession;
use log::warn;
use std::io::{BufRead, Write};
use widget_studio_core::{
    group_controls, BundleState, ControlDescriptor, ControlKind, EditTarget, Session,
};
use widget_studio_types::{Color, FieldValue, Interaction, Tone, Visual};

const HELP: &str = "\
commands:
  list                    registered widgets
  pick <id|index>         select a widget
  show                    print the rendered widget
  controls                print the editable fields
  set <key> <value>       edit a field (colors as #rrggbb)
  set <key>[<i>] <value>  edit one list element
  push <key> <value>      append a list element
  tap <n>                 activate button n
  flip | go | reset       shortcut interactions
  back                    return to the picker
  quit
";

/// Interactive command loop over a shared session
pub struct Shell {
    session: SharedSession,
}

impl Shell {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// Blank lines and `#` comments are skipped, so script files can be
    /// annotated.
    pub fn run(&self, input: impl BufRead, interactive: bool) {
        if interactive {
            println!("widget studio; type `help` for commands");
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                print!("> ");
                let _ = std::io::stdout().flush();
            }
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    warn!("input error: {}", err);
                    break;
                }
                None => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if trimmed == "quit" {
                break;
            }

            let output = self.execute(trimmed);
            if !output.is_empty() {
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
            }
        }
    }

    /// Execute one command line and return the text to print
    pub fn execute(&self, line: &str) -> String {
        let (command, rest) = split_first_word(line);
        match command {
            "help" => HELP.to_string(),
            "list" => self.cmd_list(),
            "pick" => self.cmd_pick(rest),
            "back" => self.cmd_back(),
            "show" => self.cmd_show(),
            "controls" => self.cmd_controls(),
            "set" => self.cmd_set(rest),
            "push" => self.cmd_push(rest),
            "tap" => self.cmd_tap(rest),
            "flip" => self.apply_interaction(Interaction::Flip),
            "go" => self.apply_interaction(Interaction::ToggleRun),
            "reset" => self.apply_interaction(Interaction::Reset),
            other => format!("unknown command `{}`; type `help`\n", other),
        }
    }

    fn cmd_list(&self) -> String {
        let guard = self.session.blocking_read();
        let mut out = String::new();
        match guard.bundle_state() {
            BundleState::Loading => {
                out.push_str("(a widget bundle is loading; selection is disabled)\n");
            }
            BundleState::Failed(reason) => {
                out.push_str(&format!("(last bundle load failed: {})\n", reason));
            }
            BundleState::Idle => {}
        }

        let widgets = guard.available_widgets();
        if widgets.is_empty() {
            out.push_str("no widgets registered\n");
        }
        for (i, info) in widgets.iter().enumerate() {
            out.push_str(&format!("{:>3}. {:<12} {}\n", i + 1, info.id, info.display_name));
        }
        out
    }

    fn cmd_pick(&self, rest: &str) -> String {
        if rest.is_empty() {
            return "usage: pick <id|index>\n".to_string();
        }
        let mut guard = self.session.blocking_write();
        let id = match rest.parse::<usize>() {
            Ok(n) => {
                let widgets = guard.available_widgets();
                match n.checked_sub(1).and_then(|i| widgets.get(i)) {
                    Some(info) => info.id.clone(),
                    None => return format!("error: no widget at index {}\n", n),
                }
            }
            Err(_) => rest.to_string(),
        };
        match guard.select(&id) {
            Ok(()) => render_tree(&guard),
            Err(err) => format!("error: {}\n", err),
        }
    }

    fn cmd_back(&self) -> String {
        let mut guard = self.session.blocking_write();
        if !guard.is_configuring() {
            return "already at the picker\n".to_string();
        }
        guard.exit();
        "returned to the picker\n".to_string()
    }

    fn cmd_show(&self) -> String {
        render_tree(&self.session.blocking_read())
    }

    fn cmd_controls(&self) -> String {
        let guard = self.session.blocking_read();
        let controls = match guard.controls() {
            Ok(controls) => controls,
            Err(err) => return format!("error: {}\n", err),
        };

        let mut out = String::new();
        for (group, members) in group_controls(&controls) {
            out.push_str(&format!("{}:\n", group));
            for control in members {
                out.push_str(&format_control(control));
            }
        }
        out
    }

    fn cmd_set(&self, rest: &str) -> String {
        let (field, value_str) = split_first_word(rest);
        if field.is_empty() || value_str.is_empty() {
            return "usage: set <key> <value> or set <key>[<index>] <value>\n".to_string();
        }

        if let Some((key, index)) = parse_indexed(field) {
            return self.apply_edit(
                EditTarget::ListItem {
                    key: key.to_string(),
                    index,
                },
                FieldValue::from(value_str),
            );
        }

        // whole-field edit: the control kind decides how the value parses
        let control = {
            let guard = self.session.blocking_read();
            match guard.controls() {
                Ok(controls) => match controls.into_iter().find(|c| c.key == field) {
                    Some(descriptor) => descriptor.control,
                    None => return format!("error: no field `{}`\n", field),
                },
                Err(err) => return format!("error: {}\n", err),
            }
        };

        let value = match control {
            ControlKind::TextInput | ControlKind::TextArea => FieldValue::from(value_str),
            ControlKind::NumberInput { .. } => match value_str.parse::<f64>() {
                Ok(n) => FieldValue::Number(n),
                Err(_) => return format!("error: `{}` is not a number\n", value_str),
            },
            ControlKind::ColorSwatch => match Color::from_hex(value_str) {
                Ok(color) => FieldValue::Color(color),
                Err(err) => return format!("error: {}\n", err),
            },
            ControlKind::ListEditor { .. } => {
                return format!(
                    "`{}` is a list; use `set {}[<index>] <value>` or `push {} <value>`\n",
                    field, field, field
                );
            }
        };
        self.apply_edit(EditTarget::field(field), value)
    }

    fn cmd_push(&self, rest: &str) -> String {
        let (field, value_str) = split_first_word(rest);
        if field.is_empty() || value_str.is_empty() {
            return "usage: push <key> <value>\n".to_string();
        }
        self.apply_edit(
            EditTarget::ListAppend {
                key: field.to_string(),
            },
            FieldValue::from(value_str),
        )
    }

    fn cmd_tap(&self, rest: &str) -> String {
        let n: usize = match rest.parse() {
            Ok(n) => n,
            Err(_) => return "usage: tap <n>\n".to_string(),
        };

        let action = {
            let guard = self.session.blocking_read();
            let visual = match guard.visual() {
                Ok(visual) => visual,
                Err(err) => return format!("error: {}\n", err),
            };
            let buttons = visual.buttons();
            match n.checked_sub(1).and_then(|i| buttons.get(i)) {
                Some(Visual::Button {
                    action, enabled, ..
                }) => {
                    if !enabled {
                        return format!("button {} is disabled\n", n);
                    }
                    *action
                }
                _ => return format!("error: no button {}\n", n),
            }
        };
        self.apply_interaction(action)
    }

    fn apply_edit(&self, target: EditTarget, value: FieldValue) -> String {
        let mut guard = self.session.blocking_write();
        match guard.edit(&target, value) {
            Ok(()) => render_tree(&guard),
            Err(err) => format!("error: {}\n", err),
        }
    }

    fn apply_interaction(&self, interaction: Interaction) -> String {
        let mut guard = self.session.blocking_write();
        match guard.interact(interaction) {
            Ok(()) => render_tree(&guard),
            Err(err) => format!("error: {}\n", err),
        }
    }
}

fn render_tree(session: &Session) -> String {
    match session.visual() {
        Ok(visual) => format_visual(visual),
        Err(err) => format!("error: {}\n", err),
    }
}

/// Format a visual tree as indented text, numbering buttons in display
/// order; the numbers are what `tap <n>` addresses.
fn format_visual(tree: &Visual) -> String {
    let mut out = String::new();
    let mut button_no = 0;
    format_node(&mut out, tree, 0, &mut button_no);
    out
}

fn format_node(out: &mut String, node: &Visual, depth: usize, button_no: &mut usize) {
    let pad = "  ".repeat(depth);
    match node {
        Visual::Stack {
            background,
            children,
        } => {
            match background {
                Some(color) => out.push_str(&format!("{}+ panel ({})\n", pad, color)),
                None => out.push_str(&format!("{}+ panel\n", pad)),
            }
            for child in children {
                format_node(out, child, depth + 1, button_no);
            }
        }
        Visual::Heading { text } => out.push_str(&format!("{}# {}\n", pad, text)),
        Visual::Label { text, color } => match color {
            Some(color) => out.push_str(&format!("{}{} ({})\n", pad, text, color)),
            None => out.push_str(&format!("{}{}\n", pad, text)),
        },
        Visual::Readout { text, color } => match color {
            Some(color) => out.push_str(&format!("{}[{}] ({})\n", pad, text, color)),
            None => out.push_str(&format!("{}[{}]\n", pad, text)),
        },
        Visual::Button {
            label,
            enabled,
            fill,
            text_color,
            ..
        } => {
            *button_no += 1;
            let mut line = format!("{}({}) {}", pad, button_no, label);
            match (text_color, fill) {
                (Some(text), Some(fill)) => line.push_str(&format!(" ({} on {})", text, fill)),
                (None, Some(fill)) => line.push_str(&format!(" ({})", fill)),
                _ => {}
            }
            if !enabled {
                line.push_str(" [disabled]");
            }
            line.push('\n');
            out.push_str(&line);
        }
        Visual::Banner { text, tone } => {
            let mark = match tone {
                Tone::Positive => "++",
                Tone::Negative => "--",
            };
            out.push_str(&format!("{}{} {}\n", pad, mark, text));
        }
    }
}

fn format_control(control: &ControlDescriptor) -> String {
    let head = |kind: &str| {
        format!(
            "  {} ({}, {}) = {}\n",
            control.label, control.key, kind, control.value
        )
    };
    match &control.control {
        ControlKind::TextInput => head("text"),
        ControlKind::TextArea => head("longText"),
        ControlKind::NumberInput { constraints } => match constraints {
            Some(c) => format!(
                "  {} ({}, number {}..{} step {}) = {}\n",
                control.label, control.key, c.min, c.max, c.step, control.value
            ),
            None => head("number"),
        },
        ControlKind::ColorSwatch => head("color"),
        ControlKind::ListEditor { items, .. } => {
            let mut out = format!("  {} ({}, list):\n", control.label, control.key);
            for item in items {
                out.push_str(&format!("    [{}] {}\n", item.index, item.value));
            }
            out
        }
    }
}

fn split_first_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (s, ""),
    }
}

/// Parse `key[index]` edit addresses
fn parse_indexed(field: &str) -> Option<(&str, usize)> {
    let inner = field.strip_suffix(']')?;
    let (key, index) = inner.split_once('[')?;
    if key.is_empty() {
        return None;
    }
    Some((key, index.parse().ok()?))
}
