use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, ReloadParams};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use super::scripts;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::page::{DomQuery, PageDriver, ScrollTarget};
use crate::types::Interaction;
use crate::viewport::Viewport;

/// A single Chrome tab driven over the DevTools protocol.
pub struct ChromePage {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
    press_hold: Duration,
}

impl ChromePage {
    /// Launches Chrome and opens one blank tab sized to the configured window.
    pub async fn launch(config: &Config) -> Result<Self> {
        let settings = &config.browser;
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height)
            .launch_timeout(settings.launch_timeout)
            .request_timeout(config.timings.navigation);
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        let browser_config = builder.build().map_err(AnalyzerError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("cdp handler: {err}");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        let mut tab = Self {
            browser,
            page,
            handler,
            navigation_timeout: config.timings.navigation,
            press_hold: config.timings.press_hold,
        };
        let window = Viewport::new("window", settings.window_width, settings.window_height);
        tab.resize_viewport(&window).await?;
        Ok(tab)
    }

    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }

    async fn eval_json(&self, script: String) -> Result<Value> {
        let raw: String = self
            .page
            .evaluate(script)
            .await?
            .into_value()
            .map_err(|e| AnalyzerError::browser(format!("unexpected evaluation result: {e}")))?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn bounded<F, T>(&self, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.navigation_timeout, fut)
            .await
            .map_err(|_| AnalyzerError::Timeout(self.navigation_timeout))?
    }
}

/// Starts `work` on its own task. Dropping the returned future abandons only
/// the wait; a started press/release pair always completes.
fn detached<F>(work: F) -> impl Future<Output = Result<()>>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    let handle = tokio::spawn(work);
    async move {
        handle
            .await
            .map_err(|e| AnalyzerError::browser(format!("interaction task failed: {e}")))?
    }
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let page = &self.page;
        self.bounded(async {
            page.goto(url).await?;
            Ok::<(), AnalyzerError>(())
        })
        .await
    }

    async fn reload(&mut self) -> Result<()> {
        let page = &self.page;
        self.bounded(async {
            page.execute(ReloadParams::default()).await?;
            page.wait_for_navigation().await?;
            Ok::<(), AnalyzerError>(())
        })
        .await
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn query(&mut self, query: &DomQuery) -> Result<Value> {
        self.eval_json(scripts::for_query(query)).await
    }

    async fn simulate(&mut self, selector: &str, interaction: Interaction) -> Result<()> {
        match interaction {
            Interaction::Hover => {
                self.page.find_element(selector).await?.hover().await?;
            }
            Interaction::Focus => {
                self.page.find_element(selector).await?.focus().await?;
            }
            Interaction::Click => {
                let page = self.page.clone();
                let selector = selector.to_string();
                detached(async move {
                    page.find_element(selector).await?.click().await?;
                    Ok::<(), AnalyzerError>(())
                })
                .await?;
            }
            Interaction::MouseDown => {
                self.eval_json(scripts::dispatch_mouse_event(selector, "mousedown"))
                    .await?;
                tokio::time::sleep(self.press_hold).await;
                self.eval_json(scripts::dispatch_mouse_event(selector, "mouseup"))
                    .await?;
            }
        }
        Ok(())
    }

    async fn scroll(&mut self, target: &ScrollTarget) -> Result<()> {
        self.eval_json(scripts::scroll(target)).await?;
        Ok(())
    }

    async fn resize_viewport(&mut self, viewport: &Viewport) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            false,
        );
        self.page.execute(params).await?;
        Ok(())
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .build();
        self.page.save_screenshot(params, path).await?;
        Ok(())
    }
}
