//! Spec extractor: projects a saved report into `spec/project.json` and
//! `spec/components.json` next to it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{AnalyzerError, Result};
use crate::report::write_json_pretty;
use crate::types::{
    Assets, ColorCount, ComponentSpec, GlobalStyles, Meta, Priority, ProjectSpec, TopPalette,
};

type StyleMap = Map<String, Value>;

/// The parts of a saved report the spec is built from. Style maps are kept
/// as written so properties the crawler did not know about still pass
/// through.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedReport {
    pub url: String,
    pub generated_at: String,
    pub meta: Meta,
    pub palette: SavedPalette,
    pub fonts: Vec<String>,
    pub global_styles: GlobalStyles,
    pub responsive: IndexMap<String, IgnoredAny>,
    pub components: Vec<SavedComponent>,
    pub assets: Assets,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedPalette {
    pub top_colors: Vec<ColorCount>,
    pub css_variables: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedComponent {
    pub selector: String,
    pub tag: String,
    pub text_sample: String,
    pub base: StyleMap,
    pub hover_diff: Option<SavedDiff>,
    pub focus_diff: Option<SavedDiff>,
    pub click_diff: Option<SavedDiff>,
    pub transitions: String,
    pub animation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedDiff {
    pub class_added: Vec<String>,
    pub after: Option<StyleMap>,
}

impl SavedReport {
    /// Parses report JSON. A `null` anywhere counts as an absent field.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(raw)?;
        drop_nulls(&mut value);
        Ok(serde_json::from_value(value)?)
    }
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecOptions {
    pub top_colors: usize,
    pub max_components: usize,
    pub name_len: usize,
    pub sample_text_len: usize,
}

impl Default for SpecOptions {
    fn default() -> Self {
        Self {
            top_colors: 8,
            max_components: 60,
            name_len: 60,
            sample_text_len: 200,
        }
    }
}

/// Lower-cased selector with every run of characters outside
/// `[A-Za-z0-9_-]` replaced by `-`. `index` is one-based.
pub fn component_name(selector: &str, index: usize, max_len: usize) -> String {
    let mut name = String::with_capacity(selector.len());
    let mut in_run = false;
    for ch in selector.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            name.push(ch);
            in_run = false;
        } else if !in_run {
            name.push('-');
            in_run = true;
        }
    }
    let name: String = name.trim_matches('-').chars().take(max_len).collect();
    if name.is_empty() {
        format!("component-{index}")
    } else {
        name.to_ascii_lowercase()
    }
}

fn collapse_whitespace(text: &str, max_chars: usize) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

pub fn project_spec(report: &SavedReport, opts: &SpecOptions) -> ProjectSpec {
    ProjectSpec {
        url: report.url.clone(),
        generated_at: report.generated_at.clone(),
        meta: report.meta.clone(),
        palette: TopPalette {
            top_colors: report
                .palette
                .top_colors
                .iter()
                .take(opts.top_colors)
                .cloned()
                .collect(),
        },
        css_variables: report.palette.css_variables.clone(),
        fonts: report.fonts.clone(),
        global_styles: report.global_styles.clone(),
        responsive_keys: report.responsive.keys().cloned().collect(),
        assets: report.assets.clone(),
    }
}

pub fn component_specs(report: &SavedReport, opts: &SpecOptions) -> Vec<ComponentSpec> {
    report
        .components
        .iter()
        .take(opts.max_components)
        .enumerate()
        .map(|(i, c)| {
            let after = |d: &Option<SavedDiff>| d.as_ref().and_then(|d| d.after.clone());
            ComponentSpec {
                id: i + 1,
                name: component_name(&c.selector, i + 1, opts.name_len),
                selector: c.selector.clone(),
                tag: c.tag.clone(),
                sample_text: collapse_whitespace(&c.text_sample, opts.sample_text_len),
                base: c.base.clone(),
                hover_after: after(&c.hover_diff),
                focus_after: after(&c.focus_diff),
                click_added: c
                    .click_diff
                    .as_ref()
                    .map(|d| d.class_added.clone())
                    .unwrap_or_default(),
                click_after: after(&c.click_diff),
                transitions: c.transitions.clone(),
                animation: c.animation.clone(),
                priority: Priority::for_index(i),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPaths {
    pub project: PathBuf,
    pub components: PathBuf,
}

/// Reads `report_path` and writes both spec files into a `spec/` directory
/// beside it. The source report is never modified.
pub fn extract_spec(report_path: &Path, opts: &SpecOptions) -> Result<SpecPaths> {
    if !report_path.is_file() {
        return Err(AnalyzerError::NotFound(report_path.display().to_string()));
    }
    let raw = std::fs::read_to_string(report_path)?;
    let report = SavedReport::parse(&raw)?;

    let out_dir = report_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("spec");
    std::fs::create_dir_all(&out_dir)?;

    let paths = SpecPaths {
        project: out_dir.join("project.json"),
        components: out_dir.join("components.json"),
    };
    let components = component_specs(&report, opts);
    write_json_pretty(&paths.project, &project_spec(&report, opts))?;
    write_json_pretty(&paths.components, &components)?;
    info!(
        "wrote {} components to {}",
        components.len(),
        out_dir.display()
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ComponentSnapshot, InteractionDiff, Report, ResponsiveSnapshot};
    use tempfile::TempDir;

    #[test]
    fn names_are_sanitised_selectors() {
        assert_eq!(component_name("a.Nav-Link", 1, 60), "a-nav-link");
        assert_eq!(
            component_name("div > ul li:nth-of-type(2)", 3, 60),
            "div-ul-li-nth-of-type-2"
        );
        assert_eq!(component_name("#main_menu", 1, 60), "main_menu");
        assert_eq!(component_name("", 7, 60), "component-7");
        assert_eq!(component_name(">>>", 4, 60), "component-4");
        assert_eq!(component_name(&"x".repeat(90), 1, 60).len(), 60);
    }

    #[test]
    fn sample_text_is_collapsed_and_truncated() {
        assert_eq!(collapse_whitespace("  Buy\n\t now  ", 200), "Buy now");
        assert_eq!(collapse_whitespace(&"ab ".repeat(100), 200).chars().count(), 200);
    }

    fn report_with(components: usize) -> Report {
        let mut report = Report {
            url: "https://site.test/".into(),
            generated_at: "2026-01-02T03:04:05.000Z".into(),
            ..Report::default()
        };
        report.palette.top_colors = (0..12).map(|i| ColorCount::new(format!("rgb({i}, 0, 0)"), 12 - i)).collect();
        report.palette.css_variables.insert("--z".into(), "1".into());
        report.palette.css_variables.insert("--a".into(), "2".into());
        report.responsive.insert("mobile".into(), ResponsiveSnapshot::default());
        report.responsive.insert("desktop".into(), ResponsiveSnapshot::default());
        report.components = (0..components)
            .map(|i| ComponentSnapshot {
                selector: format!("button.btn-{i}"),
                tag: "BUTTON".into(),
                text_sample: "Add\n to   cart".into(),
                click_diff: Some(InteractionDiff {
                    class_added: vec!["active".into()],
                    ..InteractionDiff::default()
                }),
                ..ComponentSnapshot::default()
            })
            .collect();
        report
    }

    fn saved(report: &Report) -> SavedReport {
        SavedReport::parse(&serde_json::to_string(report).unwrap()).unwrap()
    }

    #[test]
    fn sixty_five_components_become_sixty_tiered_specs() {
        let specs = component_specs(&saved(&report_with(65)), &SpecOptions::default());
        assert_eq!(specs.len(), 60);
        assert!(specs[..10].iter().all(|s| s.priority == Priority::High));
        assert!(specs[10..30].iter().all(|s| s.priority == Priority::Medium));
        assert!(specs[30..].iter().all(|s| s.priority == Priority::Low));
        assert_eq!(specs[0].id, 1);
        assert_eq!(specs[59].id, 60);
        assert_eq!(specs[0].name, "button-btn-0");
        assert_eq!(specs[0].sample_text, "Add to cart");
        assert_eq!(specs[0].click_added, vec!["active"]);
        assert!(specs[0].hover_after.is_none());
    }

    #[test]
    fn project_keeps_top_eight_and_key_order() {
        let project = project_spec(&saved(&report_with(1)), &SpecOptions::default());
        assert_eq!(project.palette.top_colors.len(), 8);
        assert_eq!(project.responsive_keys, vec!["mobile", "desktop"]);
        let keys: Vec<_> = project.css_variables.keys().cloned().collect();
        assert_eq!(keys, vec!["--z", "--a"]);
    }

    #[test]
    fn nulls_read_as_missing_and_styles_pass_through() {
        let raw = r##"{
            "url": "https://site.test/",
            "generatedAt": null,
            "meta": { "title": "Shop", "description": null },
            "fonts": null,
            "palette": { "topColors": null, "cssVariables": { "--brand": "#f30" } },
            "components": [{
                "selector": "a.cta",
                "tag": "A",
                "textSample": null,
                "base": { "outline": "none", "color": "rgb(0, 0, 0)" },
                "hoverDiff": { "classAdded": [], "after": null },
                "clickDiff": { "classAdded": ["on"], "after": { "color": "red", "outlineOffset": "2px" } }
            }]
        }"##;
        let report = SavedReport::parse(raw).unwrap();
        let opts = SpecOptions::default();

        let project = project_spec(&report, &opts);
        assert_eq!(project.meta.title, "Shop");
        assert_eq!(project.meta.description, "");
        assert!(project.fonts.is_empty());
        assert!(project.palette.top_colors.is_empty());

        let specs = component_specs(&report, &opts);
        assert_eq!(specs[0].sample_text, "");
        assert_eq!(specs[0].base["outline"], "none");
        let keys: Vec<_> = specs[0].base.keys().cloned().collect();
        assert_eq!(keys, vec!["outline", "color"]);
        assert!(specs[0].hover_after.is_none());
        assert_eq!(specs[0].click_added, vec!["on"]);
        assert_eq!(specs[0].click_after.as_ref().unwrap()["outlineOffset"], "2px");
    }

    #[test]
    fn writes_spec_dir_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("frontend_report_x.json");
        let original = serde_json::to_string_pretty(&report_with(65)).unwrap();
        std::fs::write(&src, &original).unwrap();

        let opts = SpecOptions::default();
        let paths = extract_spec(&src, &opts).unwrap();
        assert_eq!(paths.project, dir.path().join("spec").join("project.json"));
        let first = (
            std::fs::read(&paths.project).unwrap(),
            std::fs::read(&paths.components).unwrap(),
        );
        extract_spec(&src, &opts).unwrap();
        let second = (
            std::fs::read(&paths.project).unwrap(),
            std::fs::read(&paths.components).unwrap(),
        );
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&src).unwrap(), original);
    }

    #[test]
    fn missing_report_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = extract_spec(&dir.path().join("nope.json"), &SpecOptions::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound(_)));
    }
}
