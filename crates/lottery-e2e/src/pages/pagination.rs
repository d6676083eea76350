//! Pagination controls shared by the admin tables and the records page.

use super::PageContext;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use regex::Regex;

/// The pager under a table
#[derive(Debug)]
pub struct Pagination<'d> {
    ctx: PageContext<'d>,
    /// Pager container
    pub container: Locator,
    /// "Next page" button
    pub next_button: Locator,
    /// "Previous page" button
    pub prev_button: Locator,
    /// Current page indicator
    pub current_page: Locator,
}

impl<'d> Pagination<'d> {
    /// Build the component over a page context
    pub fn new(ctx: PageContext<'d>) -> Self {
        Self {
            ctx,
            container: Locator::xpath("//div[@class='pagination']"),
            next_button: Locator::xpath("//button[@class='pagination-btn' and text()='下一页']"),
            prev_button: Locator::xpath("//button[@class='pagination-btn' and text()='上一页']"),
            current_page: Locator::xpath("//span[@class='current-page']"),
        }
    }

    /// Whether the pager is rendered at all.
    pub async fn is_visible(&self) -> SuiteResult<bool> {
        self.ctx.driver().is_visible(self.container.selector()).await
    }

    /// Whether a next page is available.
    pub async fn has_next(&self) -> SuiteResult<bool> {
        let driver = self.ctx.driver();
        let selector = self.next_button.selector();
        Ok(driver.is_visible(selector).await? && driver.is_enabled(selector).await?)
    }

    /// Whether a previous page is available.
    pub async fn has_prev(&self) -> SuiteResult<bool> {
        let driver = self.ctx.driver();
        let selector = self.prev_button.selector();
        Ok(driver.is_visible(selector).await? && driver.is_enabled(selector).await?)
    }

    /// Go to the next page when one is available.
    pub async fn next_page(&self) -> SuiteResult<()> {
        if self.has_next().await? {
            self.ctx.click(&self.next_button).await?;
        }
        Ok(())
    }

    /// Go to the previous page when one is available.
    pub async fn prev_page(&self) -> SuiteResult<()> {
        if self.has_prev().await? {
            self.ctx.click(&self.prev_button).await?;
        }
        Ok(())
    }

    /// Read the current page number.
    pub async fn current_page_number(&self) -> SuiteResult<u32> {
        let text = self.ctx.text_of(&self.current_page).await?;
        text.trim().parse().map_err(|_| SuiteError::AssertionFailed {
            message: format!("current page is not a number: '{text}'"),
        })
    }

    /// When the pager is rendered, assert the indicator shows a number.
    /// A missing pager (single page of data) passes.
    pub async fn verify(&self) -> SuiteResult<()> {
        if !self.is_visible().await? {
            return Ok(());
        }
        self.ctx.verify_displayed(&self.container).await?;
        self.ctx.verify_displayed(&self.current_page).await?;
        let text = self.ctx.text_of(&self.current_page).await?;
        let digits = Regex::new(r"^\d+$").expect("static regex");
        if digits.is_match(text.trim()) {
            Ok(())
        } else {
            Err(SuiteError::AssertionFailed {
                message: format!("current page indicator malformed: '{text}'"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::quick_ctx;
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    #[tokio::test]
    async fn test_missing_pager_passes() {
        let driver = MockDriver::new();
        let pager = Pagination::new(quick_ctx(&driver));
        pager.verify().await.unwrap();
        assert!(!pager.has_next().await.unwrap());
    }

    #[tokio::test]
    async fn test_pager_with_numeric_indicator() {
        let driver = MockDriver::new();
        let pager = Pagination::new(quick_ctx(&driver));
        driver.add_element(pager.container.selector(), MockElement::new("pager"));
        driver.add_element(pager.current_page.selector(), MockElement::new("2"));
        pager.verify().await.unwrap();
        assert_eq!(pager.current_page_number().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_pager_with_malformed_indicator() {
        let driver = MockDriver::new();
        let pager = Pagination::new(quick_ctx(&driver));
        driver.add_element(pager.container.selector(), MockElement::new("pager"));
        driver.add_element(pager.current_page.selector(), MockElement::new("第2页"));
        assert!(pager.verify().await.is_err());
    }

    #[tokio::test]
    async fn test_next_page_noop_when_disabled() {
        let driver = MockDriver::new();
        let pager = Pagination::new(quick_ctx(&driver));
        driver.add_element(pager.next_button.selector(), MockElement::new("下一页").disabled());
        pager.next_page().await.unwrap();
        assert!(!driver.was_called("click:"));

        driver.remove_elements(pager.next_button.selector());
        driver.add_element(pager.next_button.selector(), MockElement::new("下一页"));
        pager.next_page().await.unwrap();
        assert!(driver.was_called("click:"));
    }
}
