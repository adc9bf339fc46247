//! The crawl report and its page-level records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::component::ComponentSnapshot;
use super::probe::{RevealProbe, StickyProbe};
use super::responsive::ResponsiveSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub title: String,
    pub description: String,
    /// Content of `<meta name="viewport">`.
    pub viewport: String,
    pub html_lang: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorCount {
    pub color: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luminance: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    /// Distinct text and non-transparent background colors, first seen first.
    pub colors: Vec<String>,
    /// Custom properties declared on the root element.
    pub css_variables: IndexMap<String, String>,
    pub top_colors: Vec<ColorCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyles {
    pub body_bg: String,
    pub body_color: String,
    pub font_family: String,
    pub font_size: String,
    pub line_height: String,
    pub transition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAsset {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptAsset {
    pub src: String,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub defer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetAsset {
    /// Stylesheet URL, or `inline` for `<style>` blocks.
    pub href: String,
    /// Tag name of the owner node, or `unknown`.
    pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub images: Vec<ImageAsset>,
    pub scripts: Vec<ScriptAsset>,
    pub stylesheets: Vec<StylesheetAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSummary {
    pub fonts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketCounts {
    pub navs: usize,
    pub buttons: usize,
    pub links: usize,
    pub cards: usize,
    pub inputs: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    /// Distinct locators discovered per bucket, before probe caps.
    pub candidates: BucketCounts,
    pub inspected: usize,
    pub retained: usize,
    pub skipped: usize,
    pub interaction_errors: usize,
    pub navigation_recoveries: usize,
    pub sticky_navs: usize,
    pub reveal_animations: usize,
    pub viewports_captured: usize,
}

/// Root record of one crawl. Assembled by `ReportBuilder` and not mutated
/// after it is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub url: String,
    pub generated_at: String,
    pub meta: Meta,
    pub palette: Palette,
    pub fonts: Vec<String>,
    pub global_styles: GlobalStyles,
    pub components: Vec<ComponentSnapshot>,
    pub sticky: Vec<StickyProbe>,
    pub reveals: Vec<RevealProbe>,
    pub responsive: IndexMap<String, ResponsiveSnapshot>,
    pub assets: Assets,
    pub summary: Summary,
    pub font_summary: FontSummary,
}
