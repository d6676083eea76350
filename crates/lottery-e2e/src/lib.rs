//! Browser-driven UI regression suite for the lottery web application.
//!
//! Three layers, linear control flow:
//!
//! 1. [`browser`] launches a headless Chromium over CDP and hands out page
//!    sessions behind the [`driver::Driver`] trait.
//! 2. [`pages`] wraps each screen's locators in a page object with semantic
//!    actions and assertions.
//! 3. The integration tests under `tests/` sequence page-object calls into
//!    the end-to-end scenarios (auth, draw, administration). Live-browser
//!    scenarios are `#[ignore]`d; the mock-driver tests run everywhere.
//!
//! Fixture data comes from `test-config.yaml` ([`config`]); accounts that
//! must not exist yet are generated at runtime ([`data`]).

pub mod api;
pub mod browser;
pub mod config;
pub mod data;
pub mod driver;
pub mod harness;
pub mod locator;
pub mod pages;
pub mod result;
pub mod screenshot;
pub mod wait;

pub use api::{ApiClient, ApiEnvelope, ApiReply};
pub use browser::{Browser, BrowserSettings, CdpDriver};
pub use config::{Credentials, SuiteConfig};
pub use driver::{Driver, MockDriver, MockElement};
pub use harness::{RunSummary, Scenario, ScenarioResult};
pub use locator::{Locator, LocatorOptions, Selector};
pub use result::{SuiteError, SuiteResult};
pub use screenshot::ScreenshotDir;
pub use wait::{poll_for, wait_until, WaitOptions, WaitResult};

/// Install a `tracing` subscriber reading `RUST_LOG`, defaulting to `info`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
