//! Page objects for the lottery application.
//!
//! One struct per screen, each owning its locator table and exposing
//! semantic actions and assertions. [`PageContext`] carries the helpers
//! shared by every page: waited clicks and typing, select handling, and
//! the text/visibility/title/URL assertions.

mod activity_admin;
mod home;
mod login;
mod lottery;
mod pagination;
mod prize_admin;
mod prize_records;
mod register;

pub use activity_admin::{ActivityManagementPage, STATUS_ENDED, STATUS_RUNNING};
pub use home::HomePage;
pub use login::LoginPage;
pub use lottery::LotteryPage;
pub use pagination::Pagination;
pub use prize_admin::PrizeManagementPage;
pub use prize_records::{UserPrizeRecordPage, STATUS_LOST, STATUS_WON};
pub use register::RegisterPage;

use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{poll_for, wait_until, WaitOptions};
use tracing::debug;

/// Shared page-object helpers over a driver session
#[derive(Clone, Copy)]
pub struct PageContext<'d> {
    driver: &'d dyn Driver,
    wait: WaitOptions,
}

impl std::fmt::Debug for PageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext").field("wait", &self.wait).finish()
    }
}

impl<'d> PageContext<'d> {
    /// Create a context with the default wait options
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self {
            driver,
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait options (short timeouts for mock tests)
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The underlying driver
    pub const fn driver(&self) -> &'d dyn Driver {
        self.driver
    }

    /// The wait options in effect
    pub const fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    /// Wait until the element is visible.
    pub async fn wait_visible(&self, locator: &Locator) -> SuiteResult<()> {
        let driver = self.driver;
        let selector = locator.selector();
        wait_until(self.wait, &format!("{selector} visible"), move || async move {
            driver.is_visible(selector).await
        })
        .await?;
        Ok(())
    }

    /// Wait until the element is visible and enabled.
    pub async fn wait_clickable(&self, locator: &Locator) -> SuiteResult<()> {
        let driver = self.driver;
        let selector = locator.selector();
        wait_until(self.wait, &format!("{selector} clickable"), move || async move {
            Ok(driver.is_visible(selector).await? && driver.is_enabled(selector).await?)
        })
        .await?;
        Ok(())
    }

    /// Probe for visibility within the wait budget; expiry is `Ok(false)`.
    pub async fn became_visible(&self, locator: &Locator) -> SuiteResult<bool> {
        let driver = self.driver;
        let selector = locator.selector();
        poll_for(self.wait, move || async move { driver.is_visible(selector).await }).await
    }

    /// Wait for the element, then click it.
    pub async fn click(&self, locator: &Locator) -> SuiteResult<()> {
        self.wait_clickable(locator).await?;
        self.driver.click(locator.selector()).await
    }

    /// Wait for the element, then replace its content with `text`.
    pub async fn type_text(&self, locator: &Locator, text: &str) -> SuiteResult<()> {
        self.wait_visible(locator).await?;
        self.driver.type_text(locator.selector(), text).await
    }

    /// Wait for the element, then clear it.
    pub async fn clear(&self, locator: &Locator) -> SuiteResult<()> {
        self.type_text(locator, "").await
    }

    /// Wait for the select, then choose an option by its visible text.
    pub async fn select_by_text(&self, locator: &Locator, option: &str) -> SuiteResult<()> {
        self.wait_visible(locator).await?;
        self.driver.select_by_text(locator.selector(), option).await
    }

    /// Scroll the element into view.
    pub async fn scroll_into_view(&self, locator: &Locator) -> SuiteResult<()> {
        self.driver.scroll_into_view(locator.selector()).await
    }

    /// Wait for the element and return its trimmed text.
    pub async fn text_of(&self, locator: &Locator) -> SuiteResult<String> {
        self.wait_visible(locator).await?;
        self.driver
            .text_of(locator.selector())
            .await?
            .ok_or_else(|| SuiteError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    /// Texts of every match, without waiting.
    pub async fn texts_of(&self, locator: &Locator) -> SuiteResult<Vec<String>> {
        self.driver.texts_of(locator.selector()).await
    }

    /// Assert the element's text equals `expected`.
    pub async fn verify_text(&self, locator: &Locator, expected: &str) -> SuiteResult<()> {
        let actual = self.text_of(locator).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                &format!("text of {locator}"),
                format!("'{expected}'"),
                format!("'{actual}'"),
            ))
        }
    }

    /// Assert the element's text contains `expected`.
    pub async fn verify_contains(&self, locator: &Locator, expected: &str) -> SuiteResult<()> {
        let actual = self.text_of(locator).await?;
        if actual.contains(expected) {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                &format!("text of {locator}"),
                format!("containing '{expected}'"),
                format!("'{actual}'"),
            ))
        }
    }

    /// Assert the element becomes visible.
    pub async fn verify_displayed(&self, locator: &Locator) -> SuiteResult<()> {
        self.wait_visible(locator).await.map_err(|e| match e {
            SuiteError::Timeout { .. } => SuiteError::AssertionFailed {
                message: format!("element not displayed: {locator}"),
            },
            other => other,
        })
    }

    /// Assert the element is currently hidden or absent. Checked
    /// immediately, without a wait.
    pub async fn verify_hidden(&self, locator: &Locator) -> SuiteResult<()> {
        if self.driver.is_visible(locator.selector()).await? {
            Err(SuiteError::AssertionFailed {
                message: format!("element should be hidden: {locator}"),
            })
        } else {
            Ok(())
        }
    }

    /// Assert every text of the matches is non-empty.
    pub async fn verify_non_empty_texts(&self, locator: &Locator, what: &str) -> SuiteResult<()> {
        for text in self.texts_of(locator).await? {
            if text.trim().is_empty() {
                return Err(SuiteError::AssertionFailed {
                    message: format!("{what} must not be empty ({locator})"),
                });
            }
        }
        Ok(())
    }

    /// Assert every text of the matches contains `needle`.
    pub async fn verify_texts_contain(
        &self,
        locator: &Locator,
        needle: &str,
        what: &str,
    ) -> SuiteResult<()> {
        for text in self.texts_of(locator).await? {
            if !text.contains(needle) {
                return Err(SuiteError::assertion(
                    what,
                    format!("containing '{needle}'"),
                    format!("'{text}'"),
                ));
            }
        }
        Ok(())
    }

    /// Assert every match carries a non-empty attribute.
    pub async fn verify_attribute_present(
        &self,
        locator: &Locator,
        name: &str,
        what: &str,
    ) -> SuiteResult<()> {
        for value in self.driver.attributes_of(locator.selector(), name).await? {
            match value {
                Some(v) if !v.is_empty() => {}
                _ => {
                    return Err(SuiteError::AssertionFailed {
                        message: format!("{what}: attribute '{name}' missing ({locator})"),
                    })
                }
            }
        }
        Ok(())
    }

    /// Assert the document title contains `expected`, waiting for it.
    pub async fn verify_title_contains(&self, expected: &str) -> SuiteResult<()> {
        let driver = self.driver;
        let held = poll_for(self.wait, move || async move {
            Ok(driver.title().await?.contains(expected))
        })
        .await?;
        if held {
            Ok(())
        } else {
            let actual = self.driver.title().await?;
            Err(SuiteError::assertion(
                "page title",
                format!("containing '{expected}'"),
                format!("'{actual}'"),
            ))
        }
    }

    /// Assert the current URL contains `expected`, waiting for it.
    pub async fn verify_url_contains(&self, expected: &str) -> SuiteResult<()> {
        let driver = self.driver;
        let held = poll_for(self.wait, move || async move {
            Ok(driver.current_url().await?.contains(expected))
        })
        .await?;
        if held {
            Ok(())
        } else {
            let actual = self.driver.current_url().await?;
            Err(SuiteError::assertion(
                "current URL",
                format!("containing '{expected}'"),
                format!("'{actual}'"),
            ))
        }
    }

    /// Assert a duration stayed inside a budget.
    pub fn verify_within(
        &self,
        what: &str,
        elapsed: std::time::Duration,
        budget_ms: u64,
    ) -> SuiteResult<()> {
        debug!(what, ?elapsed, budget_ms, "timing check");
        if elapsed.as_millis() as u64 <= budget_ms {
            Ok(())
        } else {
            Err(SuiteError::AssertionFailed {
                message: format!("{what} took {}ms, budget {budget_ms}ms", elapsed.as_millis()),
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Wait options short enough for mock-driver tests.
    pub fn quick_wait() -> WaitOptions {
        WaitOptions::new().with_timeout(200).with_poll_interval(10)
    }

    pub fn quick_ctx(driver: &dyn Driver) -> PageContext<'_> {
        PageContext::new(driver).with_wait(quick_wait())
    }
}
