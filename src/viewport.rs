use std::fmt;

use serde::{Deserialize, Serialize};

/// A named browser window size used by the responsive sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// The four breakpoints sampled when no config overrides them.
    pub fn defaults() -> Vec<Viewport> {
        vec![
            Viewport::new("mobile", 375, 800),
            Viewport::new("tablet", 768, 1024),
            Viewport::new("desktop", 1366, 768),
            Viewport::new("wide", 1440, 900),
        ]
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}x{}", self.name, self.width, self.height)
    }
}
