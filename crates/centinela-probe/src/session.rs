use crate::config::Viewport;
use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::SetLifecycleEventsEnabledParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// Owns a headless Chrome process and the task pumping its CDP messages.
///
/// The session is the run's single exclusive resource: created once at the
/// top, released exactly once via [`close`](Self::close) on every exit path.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    viewport: Viewport,
}

impl BrowserSession {
    /// Launch a headless browser sized to `viewport`.
    pub async fn launch(viewport: Viewport) -> Result<Self> {
        let config = BrowserConfig::builder()
            .window_size(viewport.width, viewport.height)
            .no_sandbox()
            .build()
            .map_err(Error::Browser)?;

        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            "launching headless browser"
        );
        let (browser, mut handler) = Browser::launch(config).await?;

        // The pump must run for every CDP command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            viewport,
        })
    }

    /// Open a fresh page with the mobile viewport override applied and
    /// lifecycle events enabled, so navigation quiescence is observable.
    pub async fn new_page(&self) -> Result<Page> {
        let page = self.browser.new_page("about:blank").await?;

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(self.viewport.width as i64)
            .height(self.viewport.height as i64)
            .device_scale_factor(1.0)
            .mobile(true)
            .build()
            .map_err(Error::Browser)?;
        page.execute(metrics).await?;

        let lifecycle = SetLifecycleEventsEnabledParams::builder()
            .enabled(true)
            .build()
            .map_err(Error::Browser)?;
        page.execute(lifecycle).await?;

        Ok(page)
    }

    /// Shut the browser down and reap its process. Consumes the session so
    /// release happens exactly once.
    pub async fn close(mut self) -> Result<()> {
        tracing::info!("closing browser session");
        let close_result = self.browser.close().await;
        let wait_result = self.browser.wait().await;
        self.handler_task.abort();
        close_result?;
        wait_result?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_config_builds_for_the_probe_viewport() {
        let viewport = Viewport::default();
        let config = BrowserConfig::builder()
            .window_size(viewport.width, viewport.height)
            .no_sandbox()
            .build();

        assert!(config.is_ok(), "browser config should build");
    }

    // Launch/close round-trips need a Chrome binary on the host and are
    // exercised by running the probe itself.
}
