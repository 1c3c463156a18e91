use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use fontscope_core_types::{InspectError, NodeRef};
use futures::StreamExt;
use perceiver_font::{ElementFacts, EnumerationScope, PagePort};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::{resolve_chrome_path, PageCdpConfig};
use crate::errors::{PageAdapterError, PageErrorKind};
use crate::js;

/// One live Chromium page under inspection.
///
/// Launches a discovered Chrome when no websocket endpoint is configured;
/// a connected (not launched) browser is left running on close, only the
/// CDP connection is dropped.
pub struct CdpPage {
    browser: Mutex<Option<Browser>>,
    page: Page,
    event_task: JoinHandle<()>,
    owns_browser: bool,
}

impl CdpPage {
    /// Start a browser session and navigate it to the target page.
    pub async fn open(cfg: &PageCdpConfig, url: &str) -> Result<Self, PageAdapterError> {
        let owns_browser = cfg.ws_url.is_none();
        let (browser, mut handler) = match &cfg.ws_url {
            Some(ws) => {
                info!(target: "page-cdp", ws = %ws, "connecting to existing browser");
                Browser::connect(ws.clone()).await.map_err(|err| {
                    PageAdapterError::new(PageErrorKind::CdpIo)
                        .with_hint(err.to_string())
                        .retriable(true)
                })?
            }
            None => {
                let executable = resolve_chrome_path(cfg).ok_or_else(|| {
                    PageAdapterError::new(PageErrorKind::Launch).with_hint(
                        "no Chrome/Chromium executable found; \
                         set FONTSCOPE_CHROME or pass a websocket url",
                    )
                })?;
                info!(
                    target: "page-cdp",
                    executable = %executable.display(),
                    headless = cfg.headless,
                    "launching browser"
                );
                let mut builder = BrowserConfig::builder().chrome_executable(&executable);
                if !cfg.headless {
                    builder = builder.with_head();
                }
                let browser_cfg = builder
                    .build()
                    .map_err(|err| PageAdapterError::new(PageErrorKind::Launch).with_hint(err))?;
                Browser::launch(browser_cfg).await.map_err(|err| {
                    PageAdapterError::new(PageErrorKind::Launch).with_hint(err.to_string())
                })?
            }
        };

        let event_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(|err| {
            PageAdapterError::new(PageErrorKind::CdpIo)
                .with_hint(err.to_string())
                .retriable(true)
        })?;

        let session = Self {
            browser: Mutex::new(Some(browser)),
            page,
            event_task,
            owns_browser,
        };
        session
            .navigate(url, cfg.nav_timeout_ms, cfg.settle_ms)
            .await?;
        Ok(session)
    }

    async fn navigate(
        &self,
        url: &str,
        nav_timeout_ms: u64,
        settle_ms: u64,
    ) -> Result<(), PageAdapterError> {
        let navigation = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), CdpError>(())
        };
        match timeout(Duration::from_millis(nav_timeout_ms), navigation).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                return Err(PageAdapterError::new(PageErrorKind::CdpIo)
                    .with_hint(err.to_string())
                    .retriable(true));
            }
            Err(_) => {
                return Err(PageAdapterError::new(PageErrorKind::NavTimeout)
                    .with_hint(format!("navigation to {url} exceeded {nav_timeout_ms}ms")));
            }
        }
        if settle_ms > 0 {
            sleep(Duration::from_millis(settle_ms)).await;
        }
        self.eval::<bool>(js::ensure_style_script()).await?;
        debug!(target: "page-cdp", url, "page ready for inspection");
        Ok(())
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T, PageAdapterError> {
        let outcome = self.page.evaluate(script).await.map_err(|err| {
            PageAdapterError::new(PageErrorKind::Evaluate)
                .with_hint(err.to_string())
                .retriable(true)
        })?;
        outcome.into_value::<T>().map_err(|err| {
            PageAdapterError::new(PageErrorKind::Evaluate)
                .with_hint(format!("unexpected probe payload: {err}"))
        })
    }

    /// End the session. A browser this session launched is shut down; a
    /// pre-existing browser only loses the connection.
    pub async fn close(&self) {
        if let Some(mut browser) = self.browser.lock().await.take() {
            if self.owns_browser {
                if let Err(err) = browser.close().await {
                    warn!(target: "page-cdp", ?err, "browser close failed");
                }
                let _ = browser.wait().await;
            }
        }
        self.event_task.abort();
    }
}

#[async_trait]
impl PagePort for CdpPage {
    async fn snapshot(
        &self,
        scope: &EnumerationScope,
    ) -> Result<Vec<ElementFacts>, InspectError> {
        let facts = self
            .eval::<Vec<ElementFacts>>(js::snapshot_script(scope))
            .await?;
        debug!(
            target: "page-cdp",
            scope = scope.selector(),
            elements = facts.len(),
            "page snapshot taken"
        );
        Ok(facts)
    }

    async fn font_available(&self, name: &str) -> Result<bool, InspectError> {
        Ok(self.eval::<bool>(js::availability_script(name)).await?)
    }

    async fn clear_marks(&self) -> Result<(), InspectError> {
        self.eval::<bool>(js::clear_marks_script()).await?;
        Ok(())
    }

    async fn mark(&self, nodes: &[NodeRef]) -> Result<(), InspectError> {
        if nodes.is_empty() {
            return Ok(());
        }
        self.eval::<bool>(js::mark_script(nodes)).await?;
        Ok(())
    }

    async fn scroll_into_view(&self, node: NodeRef) -> Result<(), InspectError> {
        self.eval::<bool>(js::scroll_script(node)).await?;
        Ok(())
    }
}
