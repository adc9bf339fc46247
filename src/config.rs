//! Run configuration: viewports, sampling limits, and interaction timings.
//!
//! Every field has a default, so an absent or partial config file yields the
//! stock behavior. Durations use humantime notation (`"150ms"`, `"2s"`).

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewports: Vec<Viewport>,
    pub limits: Limits,
    pub timings: Timings,
    pub browser: BrowserSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewports: Viewport::defaults(),
            limits: Limits::default(),
            timings: Timings::default(),
            browser: BrowserSettings::default(),
        }
    }
}

/// Caps that bound the cost of a run on very large pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Elements scanned (in document order) for colors and fonts.
    pub style_sample: usize,
    /// Distinct locators kept per discovery bucket.
    pub bucket_cap: usize,
    /// Card-like elements considered before locator derivation.
    pub card_query_cap: usize,
    pub navs: usize,
    pub buttons: usize,
    pub links: usize,
    pub cards: usize,
    pub inputs: usize,
    pub reveal_candidates: usize,
    pub grid_sample: usize,
    pub max_selector_len: usize,
    pub top_colors: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            style_sample: 2000,
            bucket_cap: 500,
            card_query_cap: 200,
            navs: 20,
            buttons: 200,
            links: 200,
            cards: 200,
            inputs: 100,
            reveal_candidates: 200,
            grid_sample: 10,
            max_selector_len: 200,
            top_colors: 30,
        }
    }
}

impl Limits {
    /// Upper bound on the number of probed components.
    pub fn probe_total(&self) -> usize {
        self.navs + self.buttons + self.links + self.cards + self.inputs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    #[serde(with = "humantime_serde")]
    pub navigation: Duration,
    #[serde(with = "humantime_serde")]
    pub initial_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub hover_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub hover_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub focus_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub click_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub click_fallback: Duration,
    #[serde(with = "humantime_serde")]
    pub click_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub recovery_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub press_hold: Duration,
    #[serde(with = "humantime_serde")]
    pub scroll_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub reveal_settle: Duration,
    #[serde(with = "humantime_serde")]
    pub viewport_settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(60),
            initial_settle: Duration::from_millis(600),
            hover_timeout: Duration::from_secs(2),
            hover_settle: Duration::from_millis(150),
            focus_settle: Duration::from_millis(100),
            click_timeout: Duration::from_secs(2),
            click_fallback: Duration::from_millis(500),
            click_settle: Duration::from_millis(200),
            recovery_settle: Duration::from_millis(400),
            press_hold: Duration::from_millis(100),
            scroll_settle: Duration::from_millis(300),
            reveal_settle: Duration::from_millis(400),
            viewport_settle: Duration::from_millis(300),
        }
    }
}

impl Timings {
    /// All waits collapsed to zero; navigation keeps a generous bound.
    pub fn immediate() -> Self {
        Self {
            navigation: Duration::from_secs(5),
            initial_settle: Duration::ZERO,
            hover_timeout: Duration::from_secs(1),
            hover_settle: Duration::ZERO,
            focus_settle: Duration::ZERO,
            click_timeout: Duration::from_secs(1),
            click_fallback: Duration::from_secs(1),
            click_settle: Duration::ZERO,
            recovery_settle: Duration::ZERO,
            press_hold: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            reveal_settle: Duration::ZERO,
            viewport_settle: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    /// Viewport used while loading and probing, before the responsive pass.
    pub window_width: u32,
    pub window_height: u32,
    pub executable: Option<std::path::PathBuf>,
    #[serde(with = "humantime_serde")]
    pub launch_timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
            executable: None,
            launch_timeout: Duration::from_secs(20),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| e.to_string())
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, String> {
        serde_yaml::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads a config file; `.yaml`/`.yml` are parsed as YAML, anything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw),
            _ => Self::from_toml_str(&raw),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.viewports.is_empty() {
            return Err("at least one viewport is required".to_string());
        }
        let mut seen = HashSet::new();
        for vp in &self.viewports {
            if vp.width == 0 || vp.height == 0 {
                return Err(format!("viewport '{}' must have a non-zero size", vp.name));
            }
            if !seen.insert(vp.name.as_str()) {
                return Err(format!("duplicate viewport name '{}'", vp.name));
            }
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err("browser window must have a non-zero size".to_string());
        }
        let caps = [
            ("style_sample", self.limits.style_sample),
            ("bucket_cap", self.limits.bucket_cap),
            ("max_selector_len", self.limits.max_selector_len),
            ("top_colors", self.limits.top_colors),
        ];
        for (name, value) in caps {
            if value == 0 {
                return Err(format!("limits.{name} must be greater than zero"));
            }
        }
        if self.timings.navigation.is_zero() {
            return Err("timings.navigation must be greater than zero".to_string());
        }
        Ok(())
    }
}
