//! Abstract browser session trait.
//!
//! Page objects talk to a `Driver`, not to the CDP library, so the same
//! page logic runs against a live Chromium session ([`crate::browser::CdpDriver`])
//! or against a scripted [`MockDriver`] in unit tests.

use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Object-safe async browser session.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single session can be shared by several page objects at once, the way
/// the underlying protocol connection already is.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> SuiteResult<()>;

    /// Get the current URL
    async fn current_url(&self) -> SuiteResult<String>;

    /// Get the document title
    async fn title(&self) -> SuiteResult<String>;

    /// Evaluate a JavaScript expression in the page
    async fn evaluate(&self, script: &str) -> SuiteResult<Value>;

    /// Whether at least one element matches
    async fn exists(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Number of matching elements
    async fn count(&self, selector: &Selector) -> SuiteResult<usize>;

    /// Trimmed text content of the first match, `None` when nothing matches
    async fn text_of(&self, selector: &Selector) -> SuiteResult<Option<String>>;

    /// Trimmed text content of every match
    async fn texts_of(&self, selector: &Selector) -> SuiteResult<Vec<String>>;

    /// Attribute value of the first match
    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>>;

    /// Attribute values of every match (element order, `None` where absent)
    async fn attributes_of(&self, selector: &Selector, name: &str)
        -> SuiteResult<Vec<Option<String>>>;

    /// Whether the first match is rendered visible
    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Whether the first match is enabled
    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Click the first match
    async fn click(&self, selector: &Selector) -> SuiteResult<()>;

    /// Clear the first match and type text into it
    async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()>;

    /// Select a `<select>` option by its visible text
    async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()>;

    /// Scroll the first match into view
    async fn scroll_into_view(&self, selector: &Selector) -> SuiteResult<()>;

    /// Stub out `window.confirm`/`window.alert` so the next native dialog
    /// is answered without blocking the protocol connection
    async fn arm_dialogs(&self, accept: bool) -> SuiteResult<()>;

    /// Capture a PNG screenshot of the page
    async fn screenshot(&self) -> SuiteResult<Vec<u8>>;

    /// Reload the page
    async fn reload(&self) -> SuiteResult<()>;

    /// Go back in history
    async fn back(&self) -> SuiteResult<()>;

    /// Go forward in history
    async fn forward(&self) -> SuiteResult<()>;

    /// Close the session. Sessions die with the browser by default.
    async fn close(&self) -> SuiteResult<()> {
        Ok(())
    }
}

/// A scripted element in the mock DOM
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Text content
    pub text: String,
    /// Rendered visible
    pub visible: bool,
    /// Enabled for interaction
    pub enabled: bool,
    /// Current input value
    pub value: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
}

impl MockElement {
    /// Create a visible, enabled element with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
            enabled: true,
            value: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Mark the element hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the element disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    title: String,
    elements: HashMap<String, Vec<MockElement>>,
    history: Vec<String>,
    dialogs_armed: Option<bool>,
    screenshot: Vec<u8>,
}

/// In-process driver with a scripted DOM, for unit-testing page objects.
///
/// Elements are keyed by the selector's display form, so a test scripts
/// exactly the locators the page object will use.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty mock session
    pub fn new() -> Self {
        Self::default()
    }

    /// Script one element for a selector
    pub fn add_element(&self, selector: &Selector, element: MockElement) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.elements.entry(selector.to_string()).or_default().push(element);
    }

    /// Remove everything scripted for a selector
    pub fn remove_elements(&self, selector: &Selector) {
        let mut state = self.state.lock().expect("mock state poisoned");
        let _ = state.elements.remove(&selector.to_string());
    }

    /// Replace an element's text (first match)
    pub fn set_text(&self, selector: &Selector, text: impl Into<String>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        if let Some(elements) = state.elements.get_mut(&selector.to_string()) {
            if let Some(first) = elements.first_mut() {
                first.text = text.into();
            }
        }
    }

    /// Set the mock document title
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().expect("mock state poisoned").title = title.into();
    }

    /// Set the mock screenshot payload
    pub fn set_screenshot(&self, data: Vec<u8>) {
        self.state.lock().expect("mock state poisoned").screenshot = data;
    }

    /// Recorded calls, in order
    pub fn history(&self) -> Vec<String> {
        self.state.lock().expect("mock state poisoned").history.clone()
    }

    /// Whether a call with this prefix was recorded
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .expect("mock state poisoned")
            .history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    /// The last armed dialog answer, if any
    pub fn armed_dialog_answer(&self) -> Option<bool> {
        self.state.lock().expect("mock state poisoned").dialogs_armed
    }

    /// Current value typed into an element
    pub fn value_of(&self, selector: &Selector) -> Option<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .elements
            .get(&selector.to_string())
            .and_then(|els| els.first())
            .map(|el| el.value.clone())
    }

    fn record(&self, call: String) {
        self.state.lock().expect("mock state poisoned").history.push(call);
    }

    fn first<T>(
        &self,
        selector: &Selector,
        f: impl FnOnce(&MockElement) -> T,
    ) -> Option<T> {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .elements
            .get(&selector.to_string())
            .and_then(|els| els.first())
            .map(f)
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> SuiteResult<()> {
        self.record(format!("navigate:{url}"));
        self.state.lock().expect("mock state poisoned").url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        Ok(self.state.lock().expect("mock state poisoned").url.clone())
    }

    async fn title(&self) -> SuiteResult<String> {
        Ok(self.state.lock().expect("mock state poisoned").title.clone())
    }

    async fn evaluate(&self, script: &str) -> SuiteResult<Value> {
        self.record(format!("evaluate:{script}"));
        Ok(Value::Null)
    }

    async fn exists(&self, selector: &Selector) -> SuiteResult<bool> {
        Ok(self.count(selector).await? > 0)
    }

    async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state.elements.get(&selector.to_string()).map_or(0, Vec::len))
    }

    async fn text_of(&self, selector: &Selector) -> SuiteResult<Option<String>> {
        Ok(self.first(selector, |el| el.text.trim().to_string()))
    }

    async fn texts_of(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state
            .elements
            .get(&selector.to_string())
            .map(|els| els.iter().map(|el| el.text.trim().to_string()).collect())
            .unwrap_or_default())
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>> {
        Ok(self
            .first(selector, |el| el.attributes.get(name).cloned())
            .flatten())
    }

    async fn attributes_of(
        &self,
        selector: &Selector,
        name: &str,
    ) -> SuiteResult<Vec<Option<String>>> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state
            .elements
            .get(&selector.to_string())
            .map(|els| els.iter().map(|el| el.attributes.get(name).cloned()).collect())
            .unwrap_or_default())
    }

    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool> {
        Ok(self.first(selector, |el| el.visible).unwrap_or(false))
    }

    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool> {
        Ok(self.first(selector, |el| el.enabled).unwrap_or(false))
    }

    async fn click(&self, selector: &Selector) -> SuiteResult<()> {
        if !self.exists(selector).await? {
            return Err(SuiteError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        self.record(format!("click:{selector}"));
        Ok(())
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> SuiteResult<()> {
        let mut guard = self.state.lock().expect("mock state poisoned");
        let state = &mut *guard;
        let Some(element) = state
            .elements
            .get_mut(&selector.to_string())
            .and_then(|els| els.first_mut())
        else {
            return Err(SuiteError::ElementNotFound {
                selector: selector.to_string(),
            });
        };
        element.value = text.to_string();
        state.history.push(format!("type:{selector}={text}"));
        Ok(())
    }

    async fn select_by_text(&self, selector: &Selector, option: &str) -> SuiteResult<()> {
        if !self.exists(selector).await? {
            return Err(SuiteError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        self.record(format!("select:{selector}={option}"));
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &Selector) -> SuiteResult<()> {
        self.record(format!("scroll:{selector}"));
        Ok(())
    }

    async fn arm_dialogs(&self, accept: bool) -> SuiteResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.dialogs_armed = Some(accept);
        state.history.push(format!("arm_dialogs:{accept}"));
        Ok(())
    }

    async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
        Ok(self.state.lock().expect("mock state poisoned").screenshot.clone())
    }

    async fn reload(&self) -> SuiteResult<()> {
        self.record("reload".to_string());
        Ok(())
    }

    async fn back(&self) -> SuiteResult<()> {
        self.record("back".to_string());
        Ok(())
    }

    async fn forward(&self) -> SuiteResult<()> {
        self.record("forward".to_string());
        Ok(())
    }

    async fn close(&self) -> SuiteResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}
