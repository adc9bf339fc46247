//! Page loading and static extraction: meta, assets, CSS custom properties,
//! and the colors/fonts seen on a bounded sample of elements.

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{Limits, Timings};
use crate::error::{AnalyzerError, Result};
use crate::page::{fetch, DomQuery, PageDriver};
use crate::types::{Assets, GlobalStyles, Meta};

/// Opens the page and waits for it to settle.
pub async fn load_page<P>(page: &mut P, url: &str, timings: &Timings) -> Result<()>
where
    P: PageDriver + ?Sized,
{
    tokio::time::timeout(timings.navigation, page.navigate(url))
        .await
        .map_err(|_| AnalyzerError::Timeout(timings.navigation))??;
    tokio::time::sleep(timings.initial_settle).await;
    info!("page loaded: {url}");
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StyleInventory {
    css_variables: Vec<(String, String)>,
    colors: Vec<String>,
    background_colors: Vec<String>,
    fonts: Vec<String>,
}

/// Everything the static pass reads off the loaded page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticFacts {
    pub meta: Meta,
    pub assets: Assets,
    pub css_variables: IndexMap<String, String>,
    /// Distinct text colors followed by distinct non-transparent backgrounds.
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
    pub global_styles: GlobalStyles,
}

/// Runs the static queries. A failed query leaves its part empty.
pub async fn extract_static<P>(page: &mut P, limits: &Limits) -> StaticFacts
where
    P: PageDriver + ?Sized,
{
    let meta = fetch_or_default(page, &DomQuery::Meta).await;
    let assets: Assets = fetch_or_default(page, &DomQuery::Assets).await;
    let inventory: StyleInventory = fetch_or_default(
        page,
        &DomQuery::StyleInventory {
            sample: limits.style_sample,
        },
    )
    .await;
    let global_styles = fetch_or_default(page, &DomQuery::GlobalStyles).await;

    info!(
        "static pass: {} css variables, {} colors, {} fonts, {} images, {} scripts, {} stylesheets",
        inventory.css_variables.len(),
        inventory.colors.len() + inventory.background_colors.len(),
        inventory.fonts.len(),
        assets.images.len(),
        assets.scripts.len(),
        assets.stylesheets.len()
    );

    StaticFacts {
        meta,
        assets,
        css_variables: inventory.css_variables.into_iter().collect(),
        colors: distinct(
            inventory
                .colors
                .into_iter()
                .chain(inventory.background_colors),
        ),
        fonts: distinct(inventory.fonts.into_iter()),
        global_styles,
    }
}

async fn fetch_or_default<T, P>(page: &mut P, query: &DomQuery) -> T
where
    T: serde::de::DeserializeOwned + Default,
    P: PageDriver + ?Sized,
{
    match fetch(page, query).await {
        Ok(value) => value,
        Err(err) => {
            warn!("{} query failed: {err}", query.name());
            T::default()
        }
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    values.collect::<IndexSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;
    use serde_json::json;

    fn page() -> FakePage {
        FakePage::new("https://shop.test/")
            .with_response(
                "meta",
                json!({
                    "title": "Shop",
                    "description": "Things",
                    "viewport": "width=device-width",
                    "htmlLang": "en",
                }),
            )
            .with_response(
                "style-inventory",
                json!({
                    "cssVariables": [["--brand", "#ff3300"], ["--accent", "#0033ff"]],
                    "colors": ["rgb(0, 0, 0)", "rgb(255, 51, 0)"],
                    "backgroundColors": ["rgb(255, 255, 255)", "rgb(0, 0, 0)"],
                    "fonts": ["Inter, sans-serif", "Georgia, serif"],
                }),
            )
            .with_response(
                "assets",
                json!({
                    "images": [{ "src": "https://shop.test/a.png", "alt": "A" }],
                    "scripts": [{ "src": "", "async": false, "defer": true }],
                    "stylesheets": [{ "href": "inline", "owner": "STYLE" }],
                }),
            )
    }

    #[tokio::test]
    async fn collects_static_facts_in_document_order() {
        let mut page = page();
        let facts = extract_static(&mut page, &Limits::default()).await;

        assert_eq!(facts.meta.title, "Shop");
        assert_eq!(facts.meta.html_lang, "en");
        let vars: Vec<_> = facts.css_variables.keys().cloned().collect();
        assert_eq!(vars, vec!["--brand", "--accent"]);
        assert_eq!(
            facts.colors,
            vec!["rgb(0, 0, 0)", "rgb(255, 51, 0)", "rgb(255, 255, 255)"]
        );
        assert_eq!(facts.fonts.len(), 2);
        assert!(facts.assets.scripts[0].defer);
        assert_eq!(facts.assets.stylesheets[0].href, "inline");
    }

    #[tokio::test]
    async fn failed_queries_leave_defaults() {
        let mut page = page();
        let facts = extract_static(&mut page, &Limits::default()).await;
        // No canned global-styles response: the fake errors, the pass carries on.
        assert_eq!(facts.global_styles, GlobalStyles::default());
        assert_eq!(facts.meta.title, "Shop");
    }

    #[test]
    fn distinct_keeps_first_seen_order() {
        let values = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(distinct(values.into_iter()), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn load_page_navigates() {
        let mut page = page();
        load_page(&mut page, "https://shop.test/", &Timings::immediate())
            .await
            .unwrap();
        assert_eq!(page.url, "https://shop.test/");
        assert_eq!(page.log, vec!["navigate https://shop.test/"]);
    }
}
