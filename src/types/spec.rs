//! Derived design-spec records written by `extract-spec`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::report::{Assets, ColorCount, GlobalStyles, Meta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Tier by zero-based position: the first 10 are high, the next 20 medium.
    pub fn for_index(index: usize) -> Self {
        match index {
            0..=9 => Priority::High,
            10..=29 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPalette {
    pub top_colors: Vec<ColorCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    pub url: String,
    pub generated_at: String,
    pub meta: Meta,
    pub palette: TopPalette,
    pub css_variables: IndexMap<String, String>,
    pub fonts: Vec<String>,
    pub global_styles: GlobalStyles,
    pub responsive_keys: Vec<String>,
    pub assets: Assets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// One-based position in the export.
    pub id: usize,
    pub name: String,
    pub selector: String,
    pub tag: String,
    pub sample_text: String,
    /// Computed styles exactly as recorded in the report.
    pub base: Map<String, Value>,
    pub hover_after: Option<Map<String, Value>>,
    pub focus_after: Option<Map<String, Value>>,
    pub click_added: Vec<String>,
    pub click_after: Option<Map<String, Value>>,
    pub transitions: String,
    pub animation: String,
    pub priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_position() {
        assert_eq!(Priority::for_index(0), Priority::High);
        assert_eq!(Priority::for_index(9), Priority::High);
        assert_eq!(Priority::for_index(10), Priority::Medium);
        assert_eq!(Priority::for_index(29), Priority::Medium);
        assert_eq!(Priority::for_index(30), Priority::Low);
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }
}
