//! Data types used throughout the analyzer.
//!
//! This module is organized by domain:
//! - [`component`] - Style snapshots, interactions and component records
//! - [`probe`] - Sticky and reveal probe samples
//! - [`responsive`] - Per-viewport layout snapshots
//! - [`report`] - The crawl report root and its page-level records
//! - [`spec`] - Derived project/component spec records

pub mod component;
pub mod probe;
pub mod report;
pub mod responsive;
pub mod spec;

pub use component::{
    ComponentSnapshot, ComputedStyle, Interaction, InteractionDiff, Rect, StyleSnapshot,
};
pub use probe::{PositionSample, RevealProbe, RevealSample, StickyProbe};
pub use report::{
    Assets, BucketCounts, ColorCount, FontSummary, GlobalStyles, ImageAsset, Meta, Palette,
    Report, ScriptAsset, StylesheetAsset, Summary,
};
pub use responsive::{GridInfo, PixelSize, ResponsiveSnapshot};
pub use spec::{ComponentSpec, Priority, ProjectSpec, TopPalette};
