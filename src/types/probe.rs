//! Raw samples gathered by the scroll and reveal probes.

use serde::{Deserialize, Serialize};

/// Where a nav-like element sits at one scroll offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionSample {
    pub top: f64,
    pub position: String,
    pub class_list: Vec<String>,
}

/// Samples at scroll-top, scroll-middle and scroll-bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickyProbe {
    pub selector: String,
    pub initial: Option<PositionSample>,
    pub mid: Option<PositionSample>,
    pub bottom: Option<PositionSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StickyProbe {
    /// True when every sample resolved, each reports a `fixed` or `sticky`
    /// position, and the top offset never moved.
    pub fn looks_sticky(&self) -> bool {
        let (Some(initial), Some(mid), Some(bottom)) = (&self.initial, &self.mid, &self.bottom)
        else {
            return false;
        };
        let pinned = [initial, mid, bottom]
            .iter()
            .all(|s| matches!(s.position.as_str(), "fixed" | "sticky"));
        pinned && same_offset(initial.top, mid.top) && same_offset(mid.top, bottom.top)
    }
}

fn same_offset(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.5
}

/// Visibility-related values of one element at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSample {
    pub opacity: String,
    pub transform: String,
    pub visibility: String,
    pub top: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealProbe {
    pub selector: String,
    pub before: Option<RevealSample>,
    pub after: Option<RevealSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RevealProbe {
    /// True when opacity, transform or visibility changed once the element
    /// was scrolled into view.
    pub fn looks_revealed(&self) -> bool {
        match (&self.before, &self.after) {
            (Some(before), Some(after)) => {
                before.opacity != after.opacity
                    || before.transform != after.transform
                    || before.visibility != after.visibility
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(top: f64, position: &str) -> Option<PositionSample> {
        Some(PositionSample {
            top,
            position: position.into(),
            class_list: Vec::new(),
        })
    }

    #[test]
    fn fixed_header_at_constant_offset_is_sticky() {
        let probe = StickyProbe {
            selector: "header.site".into(),
            initial: sample(0.0, "fixed"),
            mid: sample(0.0, "fixed"),
            bottom: sample(0.0, "fixed"),
            error: None,
        };
        assert!(probe.looks_sticky());
    }

    #[test]
    fn static_header_scrolling_away_is_not_sticky() {
        let probe = StickyProbe {
            selector: "header".into(),
            initial: sample(0.0, "static"),
            mid: sample(-1200.0, "static"),
            bottom: sample(-2400.0, "static"),
            error: None,
        };
        assert!(!probe.looks_sticky());

        let missing = StickyProbe {
            mid: None,
            ..probe
        };
        assert!(!missing.looks_sticky());
    }

    #[test]
    fn opacity_change_counts_as_reveal() {
        let before = RevealSample {
            opacity: "0".into(),
            transform: "matrix(1, 0, 0, 1, 0, 40)".into(),
            visibility: "visible".into(),
            top: 900.0,
        };
        let after = RevealSample {
            opacity: "1".into(),
            transform: "none".into(),
            top: 300.0,
            ..before.clone()
        };
        let probe = RevealProbe {
            selector: "section.hero".into(),
            before: Some(before.clone()),
            after: Some(after),
            error: None,
        };
        assert!(probe.looks_revealed());

        let still = RevealProbe {
            after: Some(RevealSample { top: 10.0, ..before.clone() }),
            before: Some(before),
            ..probe
        };
        assert!(!still.looks_revealed());
    }
}
