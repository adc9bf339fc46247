//! Candidate discovery: buckets of interactive elements turned into locators.

use serde::Deserialize;
use tracing::info;

use crate::config::Limits;
use crate::error::Result;
use crate::locator::{locators_for, ElementDescriptor, LocatorStyle};
use crate::page::{fetch, DomQuery, PageDriver};
use crate::types::BucketCounts;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawCandidates {
    buttons: Vec<ElementDescriptor>,
    links: Vec<ElementDescriptor>,
    inputs: Vec<ElementDescriptor>,
    navs: Vec<ElementDescriptor>,
    cards: Vec<ElementDescriptor>,
}

/// Deduplicated, capped locators per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub buttons: Vec<String>,
    pub links: Vec<String>,
    pub inputs: Vec<String>,
    pub navs: Vec<String>,
    pub cards: Vec<String>,
}

impl Candidates {
    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            navs: self.navs.len(),
            buttons: self.buttons.len(),
            links: self.links.len(),
            cards: self.cards.len(),
            inputs: self.inputs.len(),
        }
    }

    /// Locators handed to the prober: navs, buttons, links, cards, inputs,
    /// each truncated to its probe cap. Locators may repeat across buckets.
    pub fn probe_list(&self, limits: &Limits) -> Vec<String> {
        let buckets = [
            (&self.navs, limits.navs),
            (&self.buttons, limits.buttons),
            (&self.links, limits.links),
            (&self.cards, limits.cards),
            (&self.inputs, limits.inputs),
        ];
        buckets
            .into_iter()
            .flat_map(|(bucket, cap)| bucket.iter().take(cap).cloned())
            .collect()
    }

    /// Nav-like locators for sticky detection.
    pub fn sticky_targets(&self, limits: &Limits) -> &[String] {
        &self.navs[..self.navs.len().min(limits.navs)]
    }
}

pub async fn discover_candidates<P>(page: &mut P, limits: &Limits) -> Result<Candidates>
where
    P: PageDriver + ?Sized,
{
    let raw: RawCandidates = fetch(
        page,
        &DomQuery::Candidates {
            card_cap: limits.card_query_cap,
        },
    )
    .await?;

    let bucket = |elements: &[ElementDescriptor]| {
        locators_for(elements, LocatorStyle::COMPONENT, limits.bucket_cap)
    };
    let candidates = Candidates {
        buttons: bucket(&raw.buttons),
        links: bucket(&raw.links),
        inputs: bucket(&raw.inputs),
        navs: bucket(&raw.navs),
        cards: bucket(&raw.cards),
    };

    let counts = candidates.counts();
    info!(
        "candidates: {} navs, {} buttons, {} links, {} cards, {} inputs",
        counts.navs, counts.buttons, counts.links, counts.cards, counts.inputs
    );
    Ok(candidates)
}
