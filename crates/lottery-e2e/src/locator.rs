//! Locator abstraction for element selection.
//!
//! Selectors are compiled to JavaScript query expressions and evaluated in
//! the page, so CSS and XPath locators go through the same driver entry
//! point. Element waits are configured per locator instead of relying on a
//! global implicit wait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default timeout for element waits (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval for element waits (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. `button.primary`)
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Text content selector
    Text(String),
    /// CSS selector filtered by text content
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create a CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an id selector
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a text selector
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convert to a JavaScript expression yielding the first match (or null)
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({t:?}))")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.includes({text:?}))")
            }
        }
    }

    /// Convert to a JavaScript expression counting matches
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength")
            }
            Self::Id(id) => format!("(document.getElementById({id:?}) ? 1 : 0)"),
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?})).length")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).length")
            }
        }
    }

    /// Convert to a JavaScript expression yielding all matches as an array
    pub fn to_all_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
            Self::Id(id) => {
                format!("(() => {{ const el = document.getElementById({id:?}); return el ? [el] : []; }})()")
            }
            Self::Text(t) => {
                format!("Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?}))")
            }
            Self::CssWithText { css, text } => {
                format!("Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?}))")
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(id) => write!(f, "id={id}"),
            Self::Text(t) => write!(f, "text={t}"),
            Self::CssWithText { css, text } => write!(f, "css={css}[text*={text}]"),
        }
    }
}

/// Options controlling element waits
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for element waits
    pub timeout: Duration,
    /// Polling interval for element waits
    pub poll_interval: Duration,
    /// Whether the element must be visible, not merely attached
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            visible: true,
        }
    }
}

/// A locator: a selector plus its wait options
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator with a CSS selector
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from an XPath expression
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::from_selector(Selector::xpath(expr))
    }

    /// Create a locator from an element id
    pub fn id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::id(id))
    }

    /// Set a custom wait timeout
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the visibility requirement
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the wait options
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
