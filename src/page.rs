//! The controllable page seam.
//!
//! Every extraction stage talks to the browser through [`PageDriver`], so the
//! stages can run against a real Chrome tab or a scripted fake.

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::types::Interaction;
use crate::viewport::Viewport;

/// Page-side reads. Each variant returns JSON whose shape is owned by the
/// stage that issues it.
#[derive(Debug, Clone, PartialEq)]
pub enum DomQuery {
    Meta,
    Assets,
    StyleInventory { sample: usize },
    GlobalStyles,
    Candidates { card_cap: usize },
    StyleSnapshot { selector: String, text_len: usize },
    Position { selector: String },
    Reveal { selector: String },
    RevealCandidates { cap: usize },
    Layout { grid_sample: usize },
}

impl DomQuery {
    pub fn name(&self) -> &'static str {
        match self {
            DomQuery::Meta => "meta",
            DomQuery::Assets => "assets",
            DomQuery::StyleInventory { .. } => "style-inventory",
            DomQuery::GlobalStyles => "global-styles",
            DomQuery::Candidates { .. } => "candidates",
            DomQuery::StyleSnapshot { .. } => "style-snapshot",
            DomQuery::Position { .. } => "position",
            DomQuery::Reveal { .. } => "reveal",
            DomQuery::RevealCandidates { .. } => "reveal-candidates",
            DomQuery::Layout { .. } => "layout",
        }
    }
}

/// Instant (non-animated) scroll destinations.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    Top,
    /// Fraction of the document height, `1.0` being the bottom.
    Fraction(f64),
    /// Center the first element matching the selector.
    IntoView(String),
}

#[async_trait]
pub trait PageDriver: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    async fn reload(&mut self) -> Result<()>;

    async fn current_url(&mut self) -> Result<String>;

    async fn query(&mut self, query: &DomQuery) -> Result<Value>;

    async fn simulate(&mut self, selector: &str, interaction: Interaction) -> Result<()>;

    async fn scroll(&mut self, target: &ScrollTarget) -> Result<()>;

    async fn resize_viewport(&mut self, viewport: &Viewport) -> Result<()>;

    async fn screenshot(&mut self, path: &Path) -> Result<()>;
}

/// Runs a query and deserializes its result.
pub async fn fetch<T, P>(page: &mut P, query: &DomQuery) -> Result<T>
where
    T: DeserializeOwned,
    P: PageDriver + ?Sized,
{
    let value = page.query(query).await?;
    Ok(serde_json::from_value(value)?)
}
