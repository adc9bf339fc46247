//! The crawl pipeline: load, static extraction, discovery, interaction
//! probing, scroll probes and responsive sampling, in that order.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::discover::{discover_candidates, Candidates};
use crate::error::Result;
use crate::extract::{extract_static, load_page};
use crate::page::PageDriver;
use crate::prober::InteractionProber;
use crate::report::ReportBuilder;
use crate::responsive::ResponsiveSampler;
use crate::scroll::{probe_reveals, probe_sticky};
use crate::types::Report;

/// Runs every stage against `page` and assembles the report. Screenshots go
/// to `out_dir/screenshots`. Only a failed page load is fatal.
pub async fn analyze<P>(page: &mut P, url: &str, config: &Config, out_dir: &Path) -> Result<Report>
where
    P: PageDriver + ?Sized,
{
    let started = Utc::now();
    let (limits, timings) = (&config.limits, &config.timings);

    load_page(page, url, timings).await?;
    let facts = extract_static(page, limits).await;

    let candidates = match discover_candidates(page, limits).await {
        Ok(found) => found,
        Err(err) => {
            warn!("candidate discovery failed: {err}");
            Candidates::default()
        }
    };

    let probe = InteractionProber::new(timings, limits)
        .run(page, &candidates.probe_list(limits))
        .await;
    let sticky = probe_sticky(page, candidates.sticky_targets(limits), timings).await;
    let reveals = probe_reveals(page, limits, timings).await;
    let responsive = ResponsiveSampler::new(
        &config.viewports,
        timings,
        limits,
        out_dir.join("screenshots"),
    )
    .run(page)
    .await;

    let report = ReportBuilder::new(url, started)
        .top_colors(limits.top_colors)
        .static_facts(facts)
        .candidates(candidates.counts())
        .probe(probe)
        .sticky(sticky)
        .reveals(reveals)
        .responsive(responsive)
        .build();
    info!(
        "analysis finished: {} components, {} viewports",
        report.summary.retained, report.summary.viewports_captured
    );
    Ok(report)
}
