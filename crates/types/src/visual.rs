//! Renderer output model
//!
//! Widgets render to this serializable tree; turning it into pixels,
//! terminal text or DOM nodes is the front end's concern. Buttons carry the
//! `Interaction` a front end should feed back when they are activated.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Input event a front end feeds into the active widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Interaction {
    /// Choose the option at `index` (quiz)
    Select { index: usize },
    /// Turn the card over (flashcard)
    Flip,
    /// Start or pause the clock (countdown)
    ToggleRun,
    /// Restore the clock to its full duration (countdown)
    Reset,
}

/// Feedback flavor of a `Visual::Banner`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Positive,
    Negative,
}

fn default_true() -> bool {
    true
}

/// One node of a rendered widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Visual {
    /// Vertical container, optionally filled with a background color
    Stack {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<Color>,
        children: Vec<Visual>,
    },
    /// Prominent title line
    Heading { text: String },
    /// Plain line of text
    Label {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    /// Large display value, e.g. the countdown clock face
    Readout {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    /// Activatable control carrying the interaction it triggers
    #[serde(rename_all = "camelCase")]
    Button {
        label: String,
        action: Interaction,
        #[serde(default = "default_true")]
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_color: Option<Color>,
    },
    /// Result feedback line
    Banner { text: String, tone: Tone },
}

impl Visual {
    pub fn stack(background: Option<Color>, children: Vec<Visual>) -> Self {
        Visual::Stack {
            background,
            children,
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Visual::Heading { text: text.into() }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Visual::Label {
            text: text.into(),
            color: None,
        }
    }

    /// Depth-first iteration over this node and all descendants
    pub fn walk(&self) -> Vec<&Visual> {
        let mut nodes = vec![self];
        if let Visual::Stack { children, .. } = self {
            for child in children {
                nodes.extend(child.walk());
            }
        }
        nodes
    }

    /// All buttons in the tree, in display order
    pub fn buttons(&self) -> Vec<&Visual> {
        self.walk()
            .into_iter()
            .filter(|node| matches!(node, Visual::Button { .. }))
            .collect()
    }

    /// First banner in the tree, if any
    pub fn banner(&self) -> Option<(&str, Tone)> {
        self.walk().into_iter().find_map(|node| match node {
            Visual::Banner { text, tone } => Some((text.as_str(), *tone)),
            _ => None,
        })
    }
}
