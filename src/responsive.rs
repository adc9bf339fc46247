//! Responsive sampler: a fresh load, a layout snapshot and a screenshot per
//! viewport.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::config::{Limits, Timings};
use crate::error::Result;
use crate::page::{fetch, DomQuery, PageDriver};
use crate::report::file_stamp;
use crate::types::{PixelSize, ResponsiveSnapshot};
use crate::viewport::Viewport;

pub struct ResponsiveSampler<'a> {
    viewports: &'a [Viewport],
    timings: &'a Timings,
    limits: &'a Limits,
    screenshots_dir: PathBuf,
}

impl<'a> ResponsiveSampler<'a> {
    pub fn new(
        viewports: &'a [Viewport],
        timings: &'a Timings,
        limits: &'a Limits,
        screenshots_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            viewports,
            timings,
            limits,
            screenshots_dir: screenshots_dir.into(),
        }
    }

    /// Samples every viewport in order. A failing viewport is logged and left
    /// out; the rest still run.
    pub async fn run<P>(&self, page: &mut P) -> IndexMap<String, ResponsiveSnapshot>
    where
        P: PageDriver + ?Sized,
    {
        let mut snapshots = IndexMap::new();
        for viewport in self.viewports {
            match self.capture(page, viewport).await {
                Ok(snapshot) => {
                    snapshots.insert(viewport.name.clone(), snapshot);
                }
                Err(err) => warn!("responsive snapshot error at {viewport}: {err}"),
            }
        }
        info!(
            "responsive: {}/{} viewports captured",
            snapshots.len(),
            self.viewports.len()
        );
        snapshots
    }

    async fn capture<P>(&self, page: &mut P, viewport: &Viewport) -> Result<ResponsiveSnapshot>
    where
        P: PageDriver + ?Sized,
    {
        page.resize_viewport(viewport).await?;
        // Every viewport starts from a clean load, discarding probe state.
        page.reload().await?;
        tokio::time::sleep(self.timings.viewport_settle).await;

        let mut snapshot: ResponsiveSnapshot = fetch(
            page,
            &DomQuery::Layout {
                grid_sample: self.limits.grid_sample,
            },
        )
        .await?;

        match self.screenshot(page, viewport).await {
            Ok((path, size)) => {
                snapshot.screenshot = Some(path.display().to_string());
                snapshot.screenshot_size = size;
            }
            Err(err) => warn!("screenshot failed at {viewport}: {err}"),
        }
        Ok(snapshot)
    }

    async fn screenshot<P>(&self, page: &mut P, viewport: &Viewport) -> Result<(PathBuf, Option<PixelSize>)>
    where
        P: PageDriver + ?Sized,
    {
        std::fs::create_dir_all(&self.screenshots_dir)?;
        let path = self
            .screenshots_dir
            .join(format!("screenshot-{}-{}.png", viewport.name, file_stamp()));
        page.screenshot(&path).await?;
        Ok((path.clone(), read_size(&path)))
    }
}

fn read_size(path: &Path) -> Option<PixelSize> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Some(PixelSize { width, height }),
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            None
        }
    }
}
