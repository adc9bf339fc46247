//! Per-viewport layout snapshots.

use serde::{Deserialize, Serialize};

use super::component::Rect;

/// A grid-like container and how many direct children it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridInfo {
    pub class: String,
    pub items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsiveSnapshot {
    /// Bounding box of the first `header`, else `nav`, else `main`.
    pub header_rect: Option<Rect>,
    pub grids: Vec<GridInfo>,
    /// Whether a hamburger-style menu toggle exists.
    pub hamburger: bool,
    pub inner_width: u32,
    pub inner_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_size: Option<PixelSize>,
}
