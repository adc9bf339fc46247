//! Aggregation and output: color tally, report assembly, JSON and Markdown
//! files.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::color::parse_css_color;
use crate::error::Result;
use crate::extract::StaticFacts;
use crate::prober::ProbeOutcome;
use crate::types::{
    BucketCounts, ColorCount, ComponentSnapshot, FontSummary, Palette, Report,
    ResponsiveSnapshot, RevealProbe, StickyProbe, Summary,
};

/// Fonts kept in `fontSummary`.
pub const FONT_SUMMARY_LEN: usize = 20;

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current time as an ISO timestamp safe for file names (`:` and `.`
/// replaced with `-`).
pub fn file_stamp() -> String {
    stamp_for(Utc::now())
}

pub fn stamp_for(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace([':', '.'], "-")
}

impl ColorCount {
    pub fn new(color: impl Into<String>, count: usize) -> Self {
        let color = color.into();
        let parsed = parse_css_color(&color);
        Self {
            hex: parsed.map(|c| c.hex()),
            luminance: parsed.map(|c| (c.luminance() * 1000.0).round() / 1000.0),
            color,
            count,
        }
    }
}

/// Counts each component's base text and background color, most frequent
/// first. Ties keep first-seen order.
pub fn tally_colors(components: &[ComponentSnapshot], limit: usize) -> Vec<ColorCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for component in components {
        for value in [&component.base.color, &component.base.background_color] {
            if !value.is_empty() {
                *counts.entry(value.as_str()).or_insert(0) += 1;
            }
        }
    }
    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
        .into_iter()
        .take(limit)
        .map(|(color, count)| ColorCount::new(color, count))
        .collect()
}

/// Accumulates the stages' results; `build` derives the palette ranking and
/// summary and hands back the finished report.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    url: String,
    generated_at: DateTime<Utc>,
    top_colors: usize,
    facts: StaticFacts,
    candidates: BucketCounts,
    probe: ProbeOutcome,
    sticky: Vec<StickyProbe>,
    reveals: Vec<RevealProbe>,
    responsive: IndexMap<String, ResponsiveSnapshot>,
}

impl ReportBuilder {
    pub fn new(url: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            generated_at,
            top_colors: 30,
            facts: StaticFacts::default(),
            candidates: BucketCounts::default(),
            probe: ProbeOutcome::default(),
            sticky: Vec::new(),
            reveals: Vec::new(),
            responsive: IndexMap::new(),
        }
    }

    pub fn top_colors(mut self, limit: usize) -> Self {
        self.top_colors = limit;
        self
    }

    pub fn static_facts(mut self, facts: StaticFacts) -> Self {
        self.facts = facts;
        self
    }

    pub fn candidates(mut self, counts: BucketCounts) -> Self {
        self.candidates = counts;
        self
    }

    pub fn probe(mut self, outcome: ProbeOutcome) -> Self {
        self.probe = outcome;
        self
    }

    pub fn sticky(mut self, sticky: Vec<StickyProbe>) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn reveals(mut self, reveals: Vec<RevealProbe>) -> Self {
        self.reveals = reveals;
        self
    }

    pub fn responsive(mut self, responsive: IndexMap<String, ResponsiveSnapshot>) -> Self {
        self.responsive = responsive;
        self
    }

    pub fn build(self) -> Report {
        let components = self.probe.components;
        let summary = Summary {
            candidates: self.candidates,
            inspected: self.probe.inspected,
            retained: components.len(),
            skipped: self.probe.skipped,
            interaction_errors: self.probe.interaction_errors,
            navigation_recoveries: self.probe.navigation_recoveries,
            sticky_navs: self.sticky.iter().filter(|s| s.looks_sticky()).count(),
            reveal_animations: self.reveals.iter().filter(|r| r.looks_revealed()).count(),
            viewports_captured: self.responsive.len(),
        };
        let facts = self.facts;
        Report {
            url: self.url,
            generated_at: iso_timestamp(self.generated_at),
            meta: facts.meta,
            palette: Palette {
                colors: facts.colors,
                css_variables: facts.css_variables,
                top_colors: tally_colors(&components, self.top_colors),
            },
            font_summary: FontSummary {
                fonts: facts.fonts.iter().take(FONT_SUMMARY_LEN).cloned().collect(),
            },
            fonts: facts.fonts,
            global_styles: facts.global_styles,
            components,
            sticky: self.sticky,
            reveals: self.reveals,
            responsive: self.responsive,
            assets: facts.assets,
            summary,
        }
    }
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn one_line(text: &str, max_chars: usize) -> String {
    text.replace('\n', " ").chars().take(max_chars).collect()
}

fn top_or_na(sample: Option<&crate::types::PositionSample>) -> String {
    sample.map_or_else(|| "N/A".to_string(), |s| s.top.to_string())
}

/// Condensed human-readable digest of a report.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    // Writing to a String cannot fail.
    let _ = write_markdown(&mut md, report);
    md
}

fn write_markdown(md: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(md, "# Frontend Report: {}", report.url)?;
    writeln!(md, "Generated: {}", report.generated_at)?;
    writeln!(md)?;

    writeln!(md, "## Meta")?;
    writeln!(md, "- Title: {}", report.meta.title)?;
    writeln!(md, "- Description: {}", dash_if_empty(&report.meta.description))?;
    writeln!(md, "- Viewport meta: {}", dash_if_empty(&report.meta.viewport))?;
    writeln!(md, "- Language: {}", dash_if_empty(&report.meta.html_lang))?;
    writeln!(md)?;

    writeln!(md, "## Top Colors (by occurrence)")?;
    for c in report.palette.top_colors.iter().take(12) {
        match &c.hex {
            Some(hex) => writeln!(md, "- {} ({hex}, count {})", c.color, c.count)?,
            None => writeln!(md, "- {} (count {})", c.color, c.count)?,
        }
    }
    writeln!(md)?;

    writeln!(md, "## CSS Variables (sample)")?;
    for (name, value) in report.palette.css_variables.iter().take(20) {
        writeln!(md, "- {name}: {value}")?;
    }
    writeln!(md)?;

    writeln!(md, "## Fonts (sample)")?;
    for font in report.font_summary.fonts.iter().take(10) {
        writeln!(md, "- {font}")?;
    }
    writeln!(md)?;

    writeln!(md, "## Assets")?;
    writeln!(md, "- Images: {}", report.assets.images.len())?;
    writeln!(md, "- Scripts: {}", report.assets.scripts.len())?;
    writeln!(md, "- Stylesheets: {}", report.assets.stylesheets.len())?;
    writeln!(md)?;

    writeln!(md, "## Sticky / Scroll-detected navs")?;
    for s in report.sticky.iter().take(10) {
        write!(
            md,
            "- {} => initial.top: {}, mid.top: {}, bottom.top: {}",
            s.selector,
            top_or_na(s.initial.as_ref()),
            top_or_na(s.mid.as_ref()),
            top_or_na(s.bottom.as_ref())
        )?;
        if s.looks_sticky() {
            write!(md, " (sticky)")?;
        }
        writeln!(md)?;
    }
    writeln!(md)?;

    writeln!(md, "## Components sampled (first 30)")?;
    for c in report.components.iter().take(30) {
        writeln!(
            md,
            "- {} ({}): text: \"{}\"",
            c.selector,
            c.tag,
            one_line(&c.text_sample, 60)
        )?;
        if !c.transitions.is_empty() {
            writeln!(md, "  - transitions: {}", c.transitions)?;
        }
        if !c.animation.is_empty() {
            writeln!(md, "  - animation: {}", c.animation)?;
        }
        if let Some(after) = c.hover_diff.as_ref().and_then(|d| d.after.as_ref()) {
            writeln!(
                md,
                "  - hover changes: color {}, bg {}",
                dash_if_empty(&after.color),
                dash_if_empty(&after.background_color)
            )?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Responsive snapshots")?;
    for (name, snap) in &report.responsive {
        writeln!(
            md,
            "- {name}: innerWidth={}, hamburger={}",
            snap.inner_width, snap.hamburger
        )?;
        if let Some(path) = &snap.screenshot {
            writeln!(md, "  - Screenshot: {path}")?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Notes & Next steps")?;
    writeln!(
        md,
        "- This is an automated extraction. Manually verify complex interactive behaviors (e.g., carousels, auth-driven content)."
    )?;
    write!(
        md,
        "- To capture more elements raise the [limits] caps in the config file."
    )?;
    Ok(())
}

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Writes `frontend_report_<stamp>.json` and `.md` into `dir`.
pub fn write_report(report: &Report, dir: &Path, stamp: &str) -> Result<ReportPaths> {
    std::fs::create_dir_all(dir)?;
    let json = dir.join(format!("frontend_report_{stamp}.json"));
    let markdown = dir.join(format!("frontend_report_{stamp}.md"));
    write_json_pretty(&json, report)?;
    std::fs::write(&markdown, render_markdown(report))?;
    Ok(ReportPaths { json, markdown })
}
