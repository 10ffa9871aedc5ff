use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// The single browser session of a run.
///
/// Acquired once before the first audit and released unconditionally when
/// the run ends; per-pair failures must not leak it.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a headless browser and start draining its CDP handler
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder().build().map_err(Error::Browser)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be polled for any browser command to
        // make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        tracing::info!("browser session started");
        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open `url` in a fresh tab and wait for navigation to settle
    pub async fn goto(&self, url: &str) -> Result<Page> {
        let page = self.browser.new_page(url).await?;
        page.wait_for_navigation().await?;
        Ok(page)
    }

    /// Tear the session down: close the browser, reap the process, stop
    /// the handler task
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        tracing::info!("browser session closed");
        Ok(())
    }
}

// Launch/goto/close need a Chrome binary and are exercised end to end by
// the CLI when --scrape-html is used; no unit tests here.
