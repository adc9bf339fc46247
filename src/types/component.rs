//! Component snapshot types.
//!
//! A component is one probed locator: its base computed style plus the
//! observed effect of each simulated interaction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resolved style values read from `getComputedStyle` for one element.
///
/// Values are kept verbatim as the browser reports them. Empty strings are
/// omitted on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub background_color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub border_color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub border_radius: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub box_shadow: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub font_family: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub font_size: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub font_weight: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line_height: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub padding: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub margin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub position: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub top: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub left: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transition_duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub animation_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub animation_duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cursor: String,
}

/// A DOMRect as serialized by the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Everything read from the page for the first element a locator resolves to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSnapshot {
    pub selector: String,
    pub tag: String,
    pub class_list: Vec<String>,
    pub id: Option<String>,
    pub text: String,
    pub computed: ComputedStyle,
    pub rect: Option<Rect>,
}

/// The simulated interactions applied to every probed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    Hover,
    Focus,
    Click,
    #[serde(rename = "mousedown")]
    MouseDown,
}

impl Interaction {
    /// Probe order; click precedes mousedown so that navigation recovery runs
    /// before the last interaction.
    pub const ALL: [Interaction; 4] = [
        Interaction::Hover,
        Interaction::Focus,
        Interaction::Click,
        Interaction::MouseDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interaction::Hover => "hover",
            Interaction::Focus => "focus",
            Interaction::Click => "click",
            Interaction::MouseDown => "mousedown",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed effect of one interaction: class-list set difference plus the
/// style after the interaction settled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionDiff {
    pub class_added: Vec<String>,
    pub class_removed: Vec<String>,
    pub after: Option<ComputedStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InteractionDiff {
    /// Diffs two snapshots. A missing snapshot contributes an empty class list.
    pub fn between(before: Option<&StyleSnapshot>, after: Option<&StyleSnapshot>) -> Self {
        let empty: &[String] = &[];
        let before_classes = before.map_or(empty, |s| s.class_list.as_slice());
        let after_classes = after.map_or(empty, |s| s.class_list.as_slice());
        Self {
            class_added: difference(after_classes, before_classes),
            class_removed: difference(before_classes, after_classes),
            after: after.map(|s| s.computed.clone()),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn difference(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|class| !right.contains(class))
        .cloned()
        .collect()
}

/// A retained component. Only locators whose base snapshot resolved are kept,
/// so `base` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentSnapshot {
    pub selector: String,
    pub tag: String,
    pub text_sample: String,
    pub base: ComputedStyle,
    pub transitions: String,
    pub animation: String,
    pub hover_diff: Option<InteractionDiff>,
    pub focus_diff: Option<InteractionDiff>,
    pub click_diff: Option<InteractionDiff>,
    pub mousedown_diff: Option<InteractionDiff>,
}

impl ComponentSnapshot {
    pub fn from_base(base: &StyleSnapshot) -> Self {
        Self {
            selector: base.selector.clone(),
            tag: base.tag.clone(),
            text_sample: base.text.clone(),
            transitions: base.computed.transition.clone(),
            animation: base.computed.animation_name.clone(),
            base: base.computed.clone(),
            ..Self::default()
        }
    }

    pub fn diff(&self, interaction: Interaction) -> Option<&InteractionDiff> {
        match interaction {
            Interaction::Hover => self.hover_diff.as_ref(),
            Interaction::Focus => self.focus_diff.as_ref(),
            Interaction::Click => self.click_diff.as_ref(),
            Interaction::MouseDown => self.mousedown_diff.as_ref(),
        }
    }

    pub fn set_diff(&mut self, interaction: Interaction, diff: InteractionDiff) {
        let slot = match interaction {
            Interaction::Hover => &mut self.hover_diff,
            Interaction::Focus => &mut self.focus_diff,
            Interaction::Click => &mut self.click_diff,
            Interaction::MouseDown => &mut self.mousedown_diff,
        };
        *slot = Some(diff);
    }
}
