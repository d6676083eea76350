//! Chromium session over the Chrome DevTools Protocol.
//!
//! [`Browser`] owns the CDP connection and its event-handler task;
//! [`CdpDriver`] implements [`Driver`] for one page. Element operations are
//! compiled from [`Selector`]s to JavaScript and evaluated in the page, so
//! CSS and XPath locators share one code path.

use crate::driver::Driver;
use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

fn default_true() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Run headless
    #[serde(default = "default_true")]
    pub headless: bool,
    /// Viewport width
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Viewport height
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Path to a Chromium binary (None = auto-detect)
    #[serde(default)]
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable in containers)
    #[serde(default = "default_true")]
    pub sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserSettings {
    /// Set headless mode
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the Chromium binary path
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (containers/CI)
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Browser instance with a live CDP connection
#[derive(Debug)]
pub struct Browser {
    settings: BrowserSettings,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a Chromium instance.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser cannot be started or connected to.
    pub async fn launch(settings: BrowserSettings) -> SuiteResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(settings.viewport_width, settings.viewport_height);

        if !settings.headless {
            builder = builder.with_head();
        }

        if !settings.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = settings.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // Drain the CDP event stream until the connection drops.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!(headless = settings.headless, "browser launched");

        Ok(Self {
            settings,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new page session.
    ///
    /// # Errors
    ///
    /// Returns an error when the page cannot be created.
    pub async fn new_session(&self) -> SuiteResult<CdpDriver> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;

        Ok(CdpDriver {
            page: Arc::new(Mutex::new(page)),
        })
    }

    /// Get the launch settings
    pub const fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Close the browser.
    pub async fn close(self) -> SuiteResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| SuiteError::BrowserLaunch {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// Encode text as a JavaScript string literal.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_default()
}

/// A live page session implementing [`Driver`] over CDP
#[derive(Debug, Clone)]
pub struct CdpDriver {
    page: Arc<Mutex<CdpPage>>,
}

impl CdpDriver {
    async fn eval(&self, script: &str) -> SuiteResult<Value> {
        let page = self.page.lock().await;
        let result = page.evaluate(script).await.map_err(|e| SuiteError::Eval {
            message: e.to_string(),
        })?;
        result.into_value().map_err(|e| SuiteError::Eval {
            message: e.to_string(),
        })
    }

    async fn eval_bool(&self, script: &str) -> SuiteResult<bool> {
        Ok(self.eval(script).await?.as_bool().unwrap_or(false))
    }

    /// Run an element action that returns `false` when nothing matched.
    async fn element_action(&self, selector: &Selector, script: String) -> SuiteResult<()> {
        if self.eval_bool(&script).await? {
            Ok(())
        } else {
            Err(SuiteError::ElementNotFound {
                selector: selector.to_string(),
            })
        }
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn navigate(&self, url: &str) -> SuiteResult<()> {
        debug!(url, "navigate");
        let page = self.page.lock().await;
        page.goto(url).await.map_err(|e| SuiteError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        let value = self.eval("location.href").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn title(&self) -> SuiteResult<String> {
        let value = self.eval("document.title").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn evaluate(&self, script: &str) -> SuiteResult<Value> {
        self.eval(script).await
    }

    async fn exists(&self, selector: &Selector) -> SuiteResult<bool> {
        Ok(self.count(selector).await? > 0)
    }

    async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
        let value = self.eval(&selector.to_count_query()).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn text_of(&self, selector: &Selector) -> SuiteResult<Option<String>> {
        let script = format!(
            "(() => {{ const el = {q}; return el ? el.textContent.trim() : null; }})()",
            q = selector.to_query()
        );
        let value = self.eval(&script).await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn texts_of(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
        let script = format!(
            "{all}.map(el => el.textContent.trim())",
            all = selector.to_all_query()
        );
        let value = self.eval(&script).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>> {
        let script = format!(
            "(() => {{ const el = {q}; return el ? el.getAttribute({n}) : null; }})()",
            q = selector.to_query(),
            n = js_string(name)
        );
        let value = self.eval(&script).await?;
        Ok(value.as_str().map(ToString::to_string))
    }

    async fn attributes_of(
        &self,
        selector: &Selector,
        name: &str,
    ) -> SuiteResult<Vec<Option<String>>> {
        let script = format!(
            "{all}.map(el => el.getAttribute({n}))",
            all = selector.to_all_query(),
            n = js_string(name)
        );
        let value = self.eval(&script).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool> {
        let script = format!(
            "(() => {{ const el = {q}; if (!el) return false; \
             const r = el.getBoundingClientRect(); const s = getComputedStyle(el); \
             return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none'; }})()",
            q = selector.to_query()
        );
        self.eval_bool(&script).await
    }

    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool> {
        let script = format!(
            "(() => {{ const el = {q}; return !!el && !el.disabled; }})()",
            q = selector.to_query()
        );
        self.eval_bool(&script).await
    }

    async fn click(&self, selector: &Selector) -> SuiteResult<()> {
        debug!(%selector, "click");
        let script = format!(
            "(() => {{ const el = {q}; if (!el) return false; \
             el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()",
            q = selector.to_query()
        );
        self.element_action(selector, script).await
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
        debug!(%selector, "type text");
        let script = format!(
            "(() => {{ const el = {q}; if (!el) return false; el.focus(); \
             el.value = {v}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true; }})()",
            q = selector.to_query(),
            v = js_string(text)
        );
        self.element_action(selector, script).await
    }

    async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()> {
        debug!(%selector, option, "select option");
        let script = format!(
            "(() => {{ const el = {q}; if (!el || !el.options) return false; \
             const m = Array.from(el.options).find(o => o.textContent.trim() === {v}); \
             if (!m) return false; el.value = m.value; \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); return true; }})()",
            q = selector.to_query(),
            v = js_string(option)
        );
        self.element_action(selector, script).await
    }

    async fn scroll_into_view(&self, selector: &Selector) -> SuiteResult<()> {
        let script = format!(
            "(() => {{ const el = {q}; if (!el) return false; \
             el.scrollIntoView({{block: 'center'}}); return true; }})()",
            q = selector.to_query()
        );
        self.element_action(selector, script).await
    }

    async fn arm_dialogs(&self, accept: bool) -> SuiteResult<()> {
        // An unhandled confirm() blocks evaluation over CDP, so native
        // dialogs are stubbed out before the click that raises them.
        let script = format!(
            "(() => {{ window.confirm = () => {accept}; window.alert = () => undefined; return true; }})()"
        );
        let _ = self.eval_bool(&script).await?;
        Ok(())
    }

    async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let shot = page.execute(params).await.map_err(|e| SuiteError::Screenshot {
            message: e.to_string(),
        })?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&shot.data)
            .map_err(|e| SuiteError::Screenshot {
                message: e.to_string(),
            })
    }

    async fn reload(&self) -> SuiteResult<()> {
        let _ = self.eval("(() => { setTimeout(() => location.reload(), 0); return true; })()")
            .await?;
        Ok(())
    }

    async fn back(&self) -> SuiteResult<()> {
        let _ = self.eval("(() => { history.back(); return true; })()").await?;
        Ok(())
    }

    async fn forward(&self) -> SuiteResult<()> {
        let _ = self.eval("(() => { history.forward(); return true; })()").await?;
        Ok(())
    }
}
