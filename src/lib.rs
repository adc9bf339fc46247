//! Crawl one web page in headless Chrome and extract its visual language:
//! palette, fonts, CSS variables, component interaction states, sticky and
//! reveal-on-scroll behavior, and per-viewport layout.

pub mod browser;
pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod formatting;
pub mod locator;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod prober;
pub mod report;
pub mod responsive;
pub mod scroll;
pub mod spec_extract;
pub mod types;
pub mod viewport;

#[cfg(test)]
mod testing;

pub use browser::ChromePage;
pub use config::{Config, Limits, Timings};
pub use error::{AnalyzerError, ErrorPayload, Result};
pub use page::{DomQuery, PageDriver, ScrollTarget};
pub use pipeline::analyze;
pub use report::{render_markdown, tally_colors, write_report, ReportBuilder};
pub use spec_extract::{extract_spec, SpecOptions};
pub use types::{ComponentSnapshot, ComponentSpec, Interaction, ProjectSpec, Report};
pub use viewport::Viewport;
