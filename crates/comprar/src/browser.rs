//! Chromium control for the live storefront suite.
//!
//! Launches (or attaches to) a Chromium instance over the Chrome `DevTools`
//! Protocol and hands out one [`ChromiumDriver`] per page. Scenario isolation
//! is a fresh driver per scenario: drivers share the launched browser but
//! never a page.

use crate::driver::{ComprarDriver, ElementHandle};
use crate::result::{ComprarError, ComprarResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::element::Element as CdpElement;
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Interval between element resolution attempts
const POLL_INTERVAL_MS: u64 = 50;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Per-interaction timeout in milliseconds
    pub action_timeout_ms: u64,
    /// Navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
            action_timeout_ms: 5_000,
            navigation_timeout_ms: 30_000,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the per-interaction timeout
    #[must_use]
    pub const fn with_action_timeout_ms(mut self, ms: u64) -> Self {
        self.action_timeout_ms = ms;
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }
}

fn interaction_error(selector: &str, e: impl std::fmt::Display) -> ComprarError {
    ComprarError::InteractionError {
        selector: selector.to_string(),
        message: e.to_string(),
    }
}

fn evaluation_error(e: impl std::fmt::Display) -> ComprarError {
    ComprarError::EvaluationError {
        message: e.to_string(),
    }
}

/// Browser instance with a CDP connection
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new browser instance
    ///
    /// # Errors
    ///
    /// Returns error if browser cannot be launched
    pub async fn launch(config: BrowserConfig) -> ComprarResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(Duration::from_millis(config.navigation_timeout_ms))
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|message| {
            // Executable auto-detection reports its failure at build time.
            if message.contains("auto detect") {
                ComprarError::BrowserNotFound
            } else {
                ComprarError::BrowserLaunchError { message }
            }
        })?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
            ComprarError::BrowserLaunchError {
                message: e.to_string(),
            }
        })?;

        // Spawn handler task
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        tracing::info!(headless = config.headless, "chromium launched");

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Attach to an already-running browser over its websocket endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint refuses the connection
    pub async fn connect(ws_url: impl Into<String>, config: BrowserConfig) -> ComprarResult<Self> {
        let ws_url = ws_url.into();
        let (browser, mut handler) =
            CdpBrowser::connect(&ws_url)
                .await
                .map_err(|e| ComprarError::ConnectionFailed {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        tracing::info!(%ws_url, "attached to running chromium");

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a fresh page and wrap it in a driver
    ///
    /// One driver per scenario; drivers never share a page.
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be created
    pub async fn new_driver(&self) -> ComprarResult<ChromiumDriver> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
        Ok(ChromiumDriver {
            page,
            action_timeout: Duration::from_millis(self.config.action_timeout_ms),
            navigation_timeout: Duration::from_millis(self.config.navigation_timeout_ms),
        })
    }

    /// Get the browser configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser
    pub async fn close(self) -> ComprarResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| ComprarError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// CDP-backed driver over a single page
#[derive(Debug)]
pub struct ChromiumDriver {
    page: CdpPage,
    action_timeout: Duration,
    navigation_timeout: Duration,
}

impl ChromiumDriver {
    /// Resolve a selector, polling until the action timeout elapses
    ///
    /// Chromium resolves selectors point-in-time, so polling is what turns
    /// "not attached yet" into "not there" only after the timeout.
    async fn find(&self, selector: &str) -> ComprarResult<CdpElement> {
        let deadline = tokio::time::Instant::now() + self.action_timeout;
        let mut last_error = String::from("no match");
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) => last_error = e.to_string(),
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ComprarError::ElementNotFound {
                    selector: selector.to_string(),
                    message: format!(
                        "{last_error} (waited {}ms)",
                        self.action_timeout.as_millis()
                    ),
                });
            }
            tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
        }
    }

    /// Evaluate a script and decode its completion value
    async fn eval<T: serde::de::DeserializeOwned>(&self, script: &str) -> ComprarResult<T> {
        let ms = self.action_timeout.as_millis() as u64;
        let result = tokio::time::timeout(self.action_timeout, self.page.evaluate(script))
            .await
            .map_err(|_| ComprarError::Timeout { ms })?
            .map_err(evaluation_error)?;
        result.into_value().map_err(evaluation_error)
    }
}

#[async_trait]
impl ComprarDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> ComprarResult<()> {
        tracing::debug!(url, "navigate");
        let ms = self.navigation_timeout.as_millis() as u64;
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| ComprarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| ComprarError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        };
        tokio::time::timeout(self.navigation_timeout, navigation)
            .await
            .map_err(|_| ComprarError::Timeout { ms })?
    }

    async fn click(&self, selector: &str) -> ComprarResult<()> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| interaction_error(selector, e))?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> ComprarResult<()> {
        let element = self.find(selector).await?;
        element
            .click()
            .await
            .map_err(|e| interaction_error(selector, e))?;
        // Clear any previous value before typing.
        let clear = format!(
            "(() => {{ const el = document.querySelector({selector:?}); \
             if (el) {{ el.value = ''; }} }})()"
        );
        self.page
            .evaluate(clear.as_str())
            .await
            .map_err(|e| interaction_error(selector, e))?;
        element
            .type_str(text)
            .await
            .map_err(|e| interaction_error(selector, e))?;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> ComprarResult<()> {
        let script = format!(
            "(() => {{ const el = document.querySelector({selector:?}); \
             if (!el) return false; \
             el.value = {value:?}; \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()"
        );
        let found: bool = self.eval(&script).await?;
        if found {
            Ok(())
        } else {
            Err(ComprarError::ElementNotFound {
                selector: selector.to_string(),
                message: "no select matches".to_string(),
            })
        }
    }

    async fn text(&self, selector: &str) -> ComprarResult<String> {
        let element = self.find(selector).await?;
        let text = element.inner_text().await.map_err(evaluation_error)?;
        Ok(text.unwrap_or_default())
    }

    async fn input_value(&self, selector: &str) -> ComprarResult<String> {
        let script = format!(
            "(() => {{ const el = document.querySelector({selector:?}); \
             return el ? el.value : null; }})()"
        );
        let value: Option<String> = self.eval(&script).await?;
        value.ok_or_else(|| ComprarError::ElementNotFound {
            selector: selector.to_string(),
            message: "no form control matches".to_string(),
        })
    }

    async fn is_visible(&self, selector: &str) -> ComprarResult<bool> {
        let script = format!(
            "(() => {{ const el = document.querySelector({selector:?}); \
             if (!el) return false; \
             const style = window.getComputedStyle(el); \
             if (style.display === 'none' || style.visibility === 'hidden') return false; \
             const rect = el.getBoundingClientRect(); \
             return rect.width > 0 && rect.height > 0; }})()"
        );
        self.eval(&script).await
    }

    async fn query_all(&self, selector: &str) -> ComprarResult<Vec<Box<dyn ElementHandle>>> {
        let ms = self.action_timeout.as_millis() as u64;
        let elements = tokio::time::timeout(self.action_timeout, self.page.find_elements(selector))
            .await
            .map_err(|_| ComprarError::Timeout { ms })?
            .map_err(|e| ComprarError::ElementNotFound {
                selector: selector.to_string(),
                message: e.to_string(),
            })?;
        Ok(elements
            .into_iter()
            .map(|element| Box::new(CdpHandle { element }) as Box<dyn ElementHandle>)
            .collect())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        let url = self.page.url().await.map_err(evaluation_error)?;
        Ok(url.unwrap_or_else(|| String::from("about:blank")))
    }
}

/// Handle over a CDP element
#[derive(Debug)]
struct CdpHandle {
    element: CdpElement,
}

#[async_trait]
impl ElementHandle for CdpHandle {
    async fn text(&self) -> ComprarResult<String> {
        let text = self.element.inner_text().await.map_err(evaluation_error)?;
        Ok(text.unwrap_or_default())
    }

    async fn query_one(&self, selector: &str) -> ComprarResult<Box<dyn ElementHandle>> {
        let child = self
            .element
            .find_element(selector)
            .await
            .map_err(|e| ComprarError::ElementNotFound {
                selector: selector.to_string(),
                message: e.to_string(),
            })?;
        Ok(Box::new(CdpHandle { element: child }))
    }
}
