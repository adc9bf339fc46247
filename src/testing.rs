//! A scripted in-memory page for exercising the pipeline without Chrome.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{AnalyzerError, Result};
use crate::page::{DomQuery, PageDriver, ScrollTarget};
use crate::types::{ComputedStyle, Interaction};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
    pub style: ComputedStyle,
    /// Document offset of the element's top edge.
    pub offset_top: f64,
    /// Stays at the viewport top regardless of scroll.
    pub pinned: bool,
    /// Fades in once scrolled into view.
    pub reveals: bool,
    /// Classes added while an interaction is active.
    pub state_classes: HashMap<Interaction, Vec<String>>,
    /// Style overrides while an interaction is active.
    pub state_styles: HashMap<Interaction, ComputedStyle>,
    /// Clicking navigates to this URL.
    pub href: Option<String>,
}

impl FakeElement {
    pub fn new(tag: &str, classes: &[&str], color: &str, background: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            style: ComputedStyle {
                color: color.to_string(),
                background_color: background.to_string(),
                position: "static".to_string(),
                ..ComputedStyle::default()
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakePage {
    pub home: String,
    pub url: String,
    pub elements: HashMap<String, FakeElement>,
    /// Canned answers keyed by [`DomQuery::name`].
    pub responses: HashMap<&'static str, Value>,
    pub document_height: f64,
    pub scroll_y: f64,
    pub viewport: Option<Viewport>,
    pub active: HashSet<(String, Interaction)>,
    pub revealed: HashSet<String>,
    pub failing_screenshots: HashSet<String>,
    pub failing_interactions: HashSet<(String, Interaction)>,
    pub log: Vec<String>,
}

impl FakePage {
    pub fn new(home: &str) -> Self {
        Self {
            home: home.to_string(),
            document_height: 4000.0,
            ..Self::default()
        }
    }

    pub fn with_element(mut self, selector: &str, element: FakeElement) -> Self {
        self.elements.insert(selector.to_string(), element);
        self
    }

    pub fn with_response(mut self, name: &'static str, value: Value) -> Self {
        self.responses.insert(name, value);
        self
    }

    fn on_home(&self) -> bool {
        self.url == self.home
    }

    fn element(&self, selector: &str) -> Option<&FakeElement> {
        if self.on_home() {
            self.elements.get(selector)
        } else {
            None
        }
    }

    fn viewport_top(&self, el: &FakeElement) -> f64 {
        if el.pinned {
            0.0
        } else {
            el.offset_top - self.scroll_y
        }
    }

    fn snapshot(&self, selector: &str) -> Value {
        let Some(el) = self.element(selector) else {
            return Value::Null;
        };
        let mut classes = el.classes.clone();
        let mut style = el.style.clone();
        for interaction in Interaction::ALL {
            if self.active.contains(&(selector.to_string(), interaction)) {
                if let Some(extra) = el.state_classes.get(&interaction) {
                    classes.extend(extra.iter().cloned());
                }
                if let Some(over) = el.state_styles.get(&interaction) {
                    style = over.clone();
                }
            }
        }
        json!({
            "selector": selector,
            "tag": el.tag.to_uppercase(),
            "classList": classes,
            "id": null,
            "text": el.text,
            "computed": style,
            "rect": { "top": self.viewport_top(el), "height": 40.0 },
        })
    }

    fn reset_state(&mut self) {
        self.active.clear();
        self.revealed.clear();
        self.scroll_y = 0.0;
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.log.push(format!("navigate {url}"));
        self.url = url.to_string();
        self.reset_state();
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        self.log.push("reload".to_string());
        self.reset_state();
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.url.clone())
    }

    async fn query(&mut self, query: &DomQuery) -> Result<Value> {
        match query {
            DomQuery::StyleSnapshot { selector, .. } => Ok(self.snapshot(selector)),
            DomQuery::Position { selector } => Ok(match self.element(selector) {
                Some(el) => json!({
                    "top": self.viewport_top(el),
                    "position": if el.pinned { "fixed" } else { "static" },
                    "classList": el.classes,
                }),
                None => Value::Null,
            }),
            DomQuery::Reveal { selector } => Ok(match self.element(selector) {
                Some(el) => {
                    let shown = !el.reveals || self.revealed.contains(selector);
                    json!({
                        "opacity": if shown { "1" } else { "0" },
                        "transform": if shown { "none" } else { "matrix(1, 0, 0, 1, 0, 40)" },
                        "visibility": "visible",
                        "top": self.viewport_top(el),
                    })
                }
                None => Value::Null,
            }),
            DomQuery::Layout { .. } => {
                let vp = self.viewport.clone().unwrap_or(Viewport::new("window", 1280, 720));
                Ok(json!({
                    "headerRect": { "x": 0.0, "y": 0.0, "width": vp.width, "height": 64.0 },
                    "grids": [{ "class": "grid products", "items": if vp.width < 768 { 1 } else { 4 } }],
                    "hamburger": vp.width < 768,
                    "innerWidth": vp.width,
                    "innerHeight": vp.height,
                }))
            }
            other => self
                .responses
                .get(other.name())
                .cloned()
                .ok_or_else(|| AnalyzerError::browser(format!("no response for {}", other.name()))),
        }
    }

    async fn simulate(&mut self, selector: &str, interaction: Interaction) -> Result<()> {
        self.log.push(format!("{interaction} {selector}"));
        if self
            .failing_interactions
            .contains(&(selector.to_string(), interaction))
        {
            return Err(AnalyzerError::browser(format!("{interaction} failed")));
        }
        let Some(el) = self.element(selector).cloned() else {
            return Err(AnalyzerError::browser(format!("no element for {selector}")));
        };
        if interaction == Interaction::Click {
            if let Some(href) = el.href {
                self.url = href;
                self.reset_state();
                return Ok(());
            }
        }
        if interaction == Interaction::Hover {
            self.active.retain(|(_, i)| *i != Interaction::Hover);
        }
        self.active.insert((selector.to_string(), interaction));
        Ok(())
    }

    async fn scroll(&mut self, target: &ScrollTarget) -> Result<()> {
        match target {
            ScrollTarget::Top => self.scroll_y = 0.0,
            ScrollTarget::Fraction(f) => self.scroll_y = self.document_height * f,
            ScrollTarget::IntoView(selector) => {
                if let Some(el) = self.element(selector) {
                    self.scroll_y = (el.offset_top - 360.0).max(0.0);
                    self.revealed.insert(selector.clone());
                }
            }
        }
        Ok(())
    }

    async fn resize_viewport(&mut self, viewport: &Viewport) -> Result<()> {
        self.log.push(format!("resize {viewport}"));
        self.viewport = Some(viewport.clone());
        Ok(())
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        let vp = self.viewport.clone().unwrap_or(Viewport::new("window", 1280, 720));
        if self.failing_screenshots.contains(&vp.name) {
            return Err(AnalyzerError::browser("screenshot failed"));
        }
        image::RgbaImage::new(vp.width / 5, vp.height / 5)
            .save(path)
            .map_err(|e| AnalyzerError::browser(e.to_string()))?;
        Ok(())
    }
}
