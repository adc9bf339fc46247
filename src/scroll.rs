//! Scroll probes: sticky-nav sampling and reveal-on-scroll sampling.
//!
//! Both probes only gather raw samples; `StickyProbe::looks_sticky` and
//! `RevealProbe::looks_revealed` interpret them for the summary.

use tracing::{debug, info, warn};

use crate::config::{Limits, Timings};
use crate::error::Result;
use crate::locator::{locators_for, ElementDescriptor, LocatorStyle};
use crate::page::{fetch, DomQuery, PageDriver, ScrollTarget};
use crate::types::{PositionSample, RevealProbe, RevealSample, StickyProbe};

/// Samples each nav at scroll-top, the middle of the page and the bottom.
pub async fn probe_sticky<P>(page: &mut P, selectors: &[String], timings: &Timings) -> Vec<StickyProbe>
where
    P: PageDriver + ?Sized,
{
    let mut results = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let probe = match sample_positions(page, selector, timings).await {
            Ok(probe) => probe,
            Err(err) => {
                warn!("{selector}: sticky probe failed: {err}");
                StickyProbe {
                    selector: selector.clone(),
                    error: Some(err.to_string()),
                    ..StickyProbe::default()
                }
            }
        };
        results.push(probe);
    }
    let sticky = results.iter().filter(|p| p.looks_sticky()).count();
    info!("sticky probe: {} navs sampled, {sticky} look sticky", results.len());
    results
}

async fn sample_positions<P>(page: &mut P, selector: &str, timings: &Timings) -> Result<StickyProbe>
where
    P: PageDriver + ?Sized,
{
    let query = DomQuery::Position {
        selector: selector.to_string(),
    };
    let mut samples: [Option<PositionSample>; 3] = Default::default();
    let offsets = [
        ScrollTarget::Top,
        ScrollTarget::Fraction(0.5),
        ScrollTarget::Fraction(1.0),
    ];
    for (slot, target) in samples.iter_mut().zip(offsets.iter()) {
        page.scroll(target).await?;
        tokio::time::sleep(timings.scroll_settle).await;
        *slot = fetch(page, &query).await?;
    }
    let [initial, mid, bottom] = samples;
    Ok(StickyProbe {
        selector: selector.to_string(),
        initial,
        mid,
        bottom,
        error: None,
    })
}

/// Finds section-like elements and samples each before and after scrolling
/// it into view.
pub async fn probe_reveals<P>(page: &mut P, limits: &Limits, timings: &Timings) -> Vec<RevealProbe>
where
    P: PageDriver + ?Sized,
{
    let descriptors: Vec<ElementDescriptor> = match fetch(
        page,
        &DomQuery::RevealCandidates {
            cap: limits.reveal_candidates,
        },
    )
    .await
    {
        Ok(found) => found,
        Err(err) => {
            warn!("reveal candidate query failed: {err}");
            return Vec::new();
        }
    };

    let selectors = locators_for(&descriptors, LocatorStyle::SECTION, limits.reveal_candidates);
    debug!("{} reveal candidates", selectors.len());

    let mut results = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let probe = match sample_reveal(page, &selector, timings).await {
            Ok(probe) => probe,
            Err(err) => {
                warn!("{selector}: reveal probe failed: {err}");
                RevealProbe {
                    selector,
                    error: Some(err.to_string()),
                    ..RevealProbe::default()
                }
            }
        };
        results.push(probe);
    }
    let revealed = results.iter().filter(|p| p.looks_revealed()).count();
    info!("reveal probe: {} sections sampled, {revealed} animate in", results.len());
    results
}

async fn sample_reveal<P>(page: &mut P, selector: &str, timings: &Timings) -> Result<RevealProbe>
where
    P: PageDriver + ?Sized,
{
    let query = DomQuery::Reveal {
        selector: selector.to_string(),
    };
    let before: Option<RevealSample> = fetch(page, &query).await?;
    page.scroll(&ScrollTarget::IntoView(selector.to_string()))
        .await?;
    tokio::time::sleep(timings.reveal_settle).await;
    let after: Option<RevealSample> = fetch(page, &query).await?;
    Ok(RevealProbe {
        selector: selector.to_string(),
        before,
        after,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakePage};
    use serde_json::json;

    const HOME: &str = "https://site.test/";

    async fn page() -> FakePage {
        let mut header = FakeElement::new("header", &["site-header"], "rgb(0, 0, 0)", "rgb(255, 255, 255)");
        header.pinned = true;
        let mut nav = FakeElement::new("nav", &["footer-nav"], "rgb(0, 0, 0)", "");
        nav.offset_top = 3800.0;
        let mut hero = FakeElement::new("section", &["hero", "fade", "x"], "", "");
        hero.offset_top = 2400.0;
        hero.reveals = true;
        let plain = FakeElement::new("section", &[], "", "");

        let mut page = FakePage::new(HOME)
            .with_element("header.site-header", header)
            .with_element("nav.footer-nav", nav)
            .with_element("section.hero.fade", hero)
            .with_element("section", plain)
            .with_response(
                "reveal-candidates",
                json!([
                    { "tag": "section", "classes": ["hero", "fade", "x"], "hasParent": true, "sameTagIndex": 1, "sameTagCount": 2 },
                    { "tag": "section", "classes": [], "hasParent": true, "sameTagIndex": 2, "sameTagCount": 2 },
                    { "tag": "section", "classes": ["hero", "fade", "y"], "hasParent": true, "sameTagIndex": 1, "sameTagCount": 2 },
                ]),
            );
        page.navigate(HOME).await.unwrap();
        page
    }

    #[tokio::test]
    async fn pinned_header_keeps_its_offset() {
        let mut page = page().await;
        let selectors = vec!["header.site-header".to_string(), "nav.footer-nav".to_string()];
        let results = probe_sticky(&mut page, &selectors, &Timings::immediate()).await;

        assert_eq!(results.len(), 2);
        let header = &results[0];
        assert_eq!(header.initial.as_ref().unwrap().top, 0.0);
        assert_eq!(header.bottom.as_ref().unwrap().top, 0.0);
        assert!(header.looks_sticky());

        let nav = &results[1];
        assert_eq!(nav.initial.as_ref().unwrap().top, 3800.0);
        assert_eq!(nav.mid.as_ref().unwrap().top, 1800.0);
        assert_eq!(nav.bottom.as_ref().unwrap().top, -200.0);
        assert!(!nav.looks_sticky());
    }

    #[tokio::test]
    async fn missing_nav_yields_empty_samples() {
        let mut page = page().await;
        let results = probe_sticky(&mut page, &["nav#gone".to_string()], &Timings::immediate()).await;
        assert!(results[0].initial.is_none());
        assert!(results[0].error.is_none());
    }

    #[tokio::test]
    async fn reveal_probe_sees_fade_in() {
        let mut page = page().await;
        let results = probe_reveals(&mut page, &Limits::default(), &Timings::immediate()).await;

        // The two hero descriptors share a locator.
        let selectors: Vec<_> = results.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["section.hero.fade", "section"]);

        let hero = &results[0];
        assert_eq!(hero.before.as_ref().unwrap().opacity, "0");
        assert_eq!(hero.after.as_ref().unwrap().opacity, "1");
        assert!(hero.looks_revealed());
        assert!(!results[1].looks_revealed());
    }
}
