//! Interaction prober.
//!
//! For each candidate locator, snapshots the base style, then applies hover,
//! focus, click and mousedown in turn and records what changed. Everything
//! runs one locator and one interaction at a time: the page is a single
//! shared tab, and concurrent probes would race on hover, focus, scroll and
//! navigation state.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Limits, Timings};
use crate::error::Result;
use crate::page::{fetch, DomQuery, PageDriver};
use crate::types::{ComponentSnapshot, Interaction, InteractionDiff, StyleSnapshot};

/// Characters of visible text kept per snapshot.
pub const TEXT_SAMPLE_LEN: usize = 120;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeOutcome {
    pub components: Vec<ComponentSnapshot>,
    pub inspected: usize,
    /// Locators skipped because they were invalid or never resolved.
    pub skipped: usize,
    pub interaction_errors: usize,
    pub navigation_recoveries: usize,
}

pub struct InteractionProber<'a> {
    timings: &'a Timings,
    limits: &'a Limits,
}

impl<'a> InteractionProber<'a> {
    pub fn new(timings: &'a Timings, limits: &'a Limits) -> Self {
        Self { timings, limits }
    }

    pub async fn run<P>(&self, page: &mut P, selectors: &[String]) -> ProbeOutcome
    where
        P: PageDriver + ?Sized,
    {
        info!("Inspecting {} selected elements...", selectors.len());
        let mut outcome = ProbeOutcome::default();

        for selector in selectors {
            outcome.inspected += 1;
            if selector.is_empty() || selector.len() > self.limits.max_selector_len {
                debug!("skipping unusable locator ({} chars)", selector.len());
                outcome.skipped += 1;
                continue;
            }

            let base = match self.snapshot(page, selector).await {
                Ok(Some(base)) => base,
                Ok(None) => {
                    debug!("{selector}: no element, skipped");
                    outcome.skipped += 1;
                    continue;
                }
                Err(err) => {
                    debug!("{selector}: base snapshot failed: {err}");
                    outcome.skipped += 1;
                    continue;
                }
            };

            let mut component = ComponentSnapshot::from_base(&base);
            for interaction in Interaction::ALL {
                let diff = self.probe(page, selector, interaction, &mut outcome).await;
                if diff.is_error() {
                    outcome.interaction_errors += 1;
                }
                component.set_diff(interaction, diff);
            }
            outcome.components.push(component);
        }

        info!(
            "inspected {} locators: {} retained, {} skipped, {} interaction errors, {} navigation recoveries",
            outcome.inspected,
            outcome.components.len(),
            outcome.skipped,
            outcome.interaction_errors,
            outcome.navigation_recoveries
        );
        outcome
    }

    /// Measures one interaction. Errors become an error marker on the diff.
    async fn probe<P>(
        &self,
        page: &mut P,
        selector: &str,
        interaction: Interaction,
        outcome: &mut ProbeOutcome,
    ) -> InteractionDiff
    where
        P: PageDriver + ?Sized,
    {
        let origin = if interaction == Interaction::Click {
            match page.current_url().await {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("{selector}: could not read url before click: {err}");
                    None
                }
            }
        } else {
            None
        };

        let diff = match self.measure(page, selector, interaction).await {
            Ok(diff) => diff,
            Err(err) => {
                warn!("{selector}: {interaction} probe failed: {err}");
                InteractionDiff::failed(err.to_string())
            }
        };

        if let Some(origin) = origin {
            match self.restore(page, selector, &origin).await {
                Ok(true) => outcome.navigation_recoveries += 1,
                Ok(false) => {}
                Err(err) => warn!("{selector}: could not restore {origin}: {err}"),
            }
        }
        diff
    }

    async fn measure<P>(
        &self,
        page: &mut P,
        selector: &str,
        interaction: Interaction,
    ) -> Result<InteractionDiff>
    where
        P: PageDriver + ?Sized,
    {
        let before = self.snapshot(page, selector).await?;
        self.apply(page, selector, interaction).await;
        let after = self.snapshot(page, selector).await?;
        Ok(InteractionDiff::between(before.as_ref(), after.as_ref()))
    }

    /// Simulates the interaction and waits for transitions to settle. The
    /// simulation itself is best effort: failures and timeouts count as "no
    /// effect".
    async fn apply<P>(&self, page: &mut P, selector: &str, interaction: Interaction)
    where
        P: PageDriver + ?Sized,
    {
        let t = self.timings;
        let result = match interaction {
            // Whichever finishes first wins; a slow click never blocks the run.
            Interaction::Click => {
                tokio::select! {
                    res = bounded(t.click_timeout, page.simulate(selector, interaction)) => res,
                    _ = tokio::time::sleep(t.click_fallback) => Ok(()),
                }
            }
            _ => bounded(t.hover_timeout, page.simulate(selector, interaction)).await,
        };
        if let Err(err) = result {
            debug!("{selector}: {interaction} had no effect: {err}");
        }
        tokio::time::sleep(settle_for(t, interaction)).await;
    }

    /// Reloads the pre-click URL if the click navigated away.
    async fn restore<P>(&self, page: &mut P, selector: &str, origin: &str) -> Result<bool>
    where
        P: PageDriver + ?Sized,
    {
        let now = page.current_url().await?;
        if now == origin {
            return Ok(false);
        }
        info!("click on {selector} navigated to {now}; restoring {origin}");
        page.navigate(origin).await?;
        tokio::time::sleep(self.timings.recovery_settle).await;
        Ok(true)
    }

    async fn snapshot<P>(&self, page: &mut P, selector: &str) -> Result<Option<StyleSnapshot>>
    where
        P: PageDriver + ?Sized,
    {
        let snapshot: Option<StyleSnapshot> = fetch(
            page,
            &DomQuery::StyleSnapshot {
                selector: selector.to_string(),
                text_len: TEXT_SAMPLE_LEN,
            },
        )
        .await?;
        Ok(snapshot.map(|mut snap| {
            if snap.text.chars().count() > TEXT_SAMPLE_LEN {
                snap.text = snap.text.chars().take(TEXT_SAMPLE_LEN).collect();
            }
            snap
        }))
    }
}

fn settle_for(timings: &Timings, interaction: Interaction) -> Duration {
    match interaction {
        Interaction::Hover => timings.hover_settle,
        Interaction::Focus => timings.focus_settle,
        Interaction::Click => timings.click_settle,
        Interaction::MouseDown => Duration::ZERO,
    }
}

async fn bounded<F>(limit: Duration, fut: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res,
        Err(_) => Err(crate::error::AnalyzerError::Timeout(limit)),
    }
}
