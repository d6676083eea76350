//! The user's prize record page: winnings table and summary panel.

use super::pagination::Pagination;
use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::WaitOptions;
use std::time::Instant;

/// Load budget for the records page, in milliseconds
const LOAD_BUDGET_MS: u64 = 8000;

/// Record status for a winning draw
pub const STATUS_WON: &str = "已中奖";
/// Record status for a losing draw
pub const STATUS_LOST: &str = "未中奖";

/// The prize record page
#[derive(Debug)]
pub struct UserPrizeRecordPage<'d> {
    ctx: PageContext<'d>,
    /// Page heading
    pub page_title: Locator,
    /// Table body
    pub table_body: Locator,
    /// Table rows
    pub record_rows: Locator,
    /// ID column cells
    pub record_ids: Locator,
    /// Prize name column cells
    pub prize_names: Locator,
    /// Prize description column cells
    pub prize_descriptions: Locator,
    /// Prize price column cells
    pub prize_prices: Locator,
    /// Draw date column cells
    pub draw_dates: Locator,
    /// Record status column cells
    pub record_statuses: Locator,
    /// Prize image column images
    pub prize_images: Locator,
    /// Empty-state message
    pub no_records_message: Locator,
    /// Summary panel
    pub user_summary: Locator,
    /// Total winnings counter
    pub total_prizes: Locator,
    /// Total value line
    pub total_value: Locator,
    /// Last draw date line
    pub last_draw_date: Locator,
    /// Pager under the table
    pub pagination: Pagination<'d>,
}

impl<'d> UserPrizeRecordPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        let ctx = PageContext::new(driver);
        Self {
            page_title: Locator::xpath("//h3[text()='我的中奖记录']"),
            table_body: Locator::xpath("//div[@id='prize-records-table-body']"),
            record_rows: Locator::xpath("//table//tbody//tr"),
            record_ids: Locator::xpath("//table//tbody//tr//td[1]"),
            prize_names: Locator::xpath("//table//tbody//tr//td[2]"),
            prize_descriptions: Locator::xpath("//table//tbody//tr//td[3]"),
            prize_prices: Locator::xpath("//table//tbody//tr//td[4]"),
            draw_dates: Locator::xpath("//table//tbody//tr//td[5]"),
            record_statuses: Locator::xpath("//table//tbody//tr//td[6]"),
            prize_images: Locator::xpath("//table//tbody//tr//td[7]//img"),
            no_records_message: Locator::xpath("//div[@id='no-records']"),
            user_summary: Locator::xpath("//div[@id='user-summary']"),
            total_prizes: Locator::xpath("//div[@id='user-summary']//span[@id='total-prizes']"),
            total_value: Locator::xpath("//div[@id='user-summary']//span[@id='total-value']"),
            last_draw_date: Locator::xpath(
                "//div[@id='user-summary']//span[@id='last-draw-date']",
            ),
            pagination: Pagination::new(ctx),
            ctx,
        }
    }

    /// Override the wait options (used by mock tests)
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.ctx = self.ctx.with_wait(wait);
        self.pagination = Pagination::new(self.ctx);
        self
    }

    /// Assert the page rendered with its table and summary.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.page_title).await?;
        self.ctx.verify_text(&self.page_title, "我的中奖记录").await?;
        self.ctx.verify_displayed(&self.table_body).await?;
        self.ctx.verify_displayed(&self.user_summary).await
    }

    /// Assert either records or the explicit empty state.
    pub async fn verify_records_displayed(&self) -> SuiteResult<()> {
        if self.record_count().await? > 0 {
            Ok(())
        } else {
            self.ctx.verify_displayed(&self.no_records_message).await
        }
    }

    /// Assert every record row is complete; a page without records passes.
    pub async fn verify_record_completeness(&self) -> SuiteResult<()> {
        if self.record_count().await? == 0 {
            return Ok(());
        }
        self.ctx.verify_non_empty_texts(&self.record_ids, "record id").await?;
        self.ctx.verify_non_empty_texts(&self.prize_names, "prize name").await?;
        self.ctx
            .verify_non_empty_texts(&self.prize_descriptions, "prize description")
            .await?;
        self.ctx.verify_texts_contain(&self.prize_prices, "¥", "prize price").await?;
        self.ctx.verify_non_empty_texts(&self.draw_dates, "draw date").await?;
        for status in self.ctx.texts_of(&self.record_statuses).await? {
            if status != STATUS_WON && status != STATUS_LOST {
                return Err(SuiteError::AssertionFailed {
                    message: format!("unknown record status: '{status}'"),
                });
            }
        }
        self.ctx
            .verify_attribute_present(&self.prize_images, "src", "prize image")
            .await
    }

    /// Assert the pager, when rendered.
    pub async fn verify_pagination(&self) -> SuiteResult<()> {
        self.pagination.verify().await
    }

    /// Assert the summary panel and its three lines.
    pub async fn verify_summary(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.user_summary).await?;
        self.ctx.verify_contains(&self.total_prizes, "总中奖数量").await?;
        self.ctx.verify_contains(&self.total_value, "总价值").await?;
        self.ctx.verify_contains(&self.last_draw_date, "最后抽奖").await
    }

    /// Number of record rows.
    pub async fn record_count(&self) -> SuiteResult<usize> {
        self.ctx.driver().count(self.record_rows.selector()).await
    }

    /// ID of the first record, when any.
    pub async fn first_record_id(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.record_ids).await?.into_iter().next())
    }

    /// Prize name of the first record, when any.
    pub async fn first_prize_name(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_names).await?.into_iter().next())
    }

    /// Status of the first record, when any.
    pub async fn first_record_status(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.record_statuses).await?.into_iter().next())
    }

    /// Total winnings parsed from the summary line ("总中奖数量: 5" -> 5).
    pub async fn total_prizes(&self) -> SuiteResult<u32> {
        let text = self.ctx.text_of(&self.total_prizes).await?;
        text.rsplit(&[':', '：'][..])
            .next()
            .and_then(|n| n.trim().parse().ok())
            .ok_or_else(|| SuiteError::AssertionFailed {
                message: format!("total prizes malformed: '{text}'"),
            })
    }

    /// The raw total value line.
    pub async fn total_value(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.total_value).await
    }

    /// The raw last draw date line.
    pub async fn last_draw_date(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.last_draw_date).await
    }

    /// Assert the page settles inside its load budget.
    pub async fn verify_load_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.verify_loaded().await?;
        self.ctx.verify_within("prize records load", start.elapsed(), LOAD_BUDGET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::quick_wait;
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn page(driver: &MockDriver) -> UserPrizeRecordPage<'_> {
        UserPrizeRecordPage::new(driver).with_wait(quick_wait())
    }

    fn script_page(driver: &MockDriver, page: &UserPrizeRecordPage<'_>) {
        driver.add_element(page.page_title.selector(), MockElement::new("我的中奖记录"));
        driver.add_element(page.table_body.selector(), MockElement::new("body"));
        driver.add_element(page.user_summary.selector(), MockElement::new("summary"));
        driver.add_element(page.total_prizes.selector(), MockElement::new("总中奖数量: 5"));
        driver.add_element(page.total_value.selector(), MockElement::new("总价值: ¥299.5"));
        driver.add_element(page.last_draw_date.selector(), MockElement::new("最后抽奖: 2026-08-01"));
    }

    #[tokio::test]
    async fn test_loaded_and_summary() {
        let driver = MockDriver::new();
        let records = page(&driver);
        script_page(&driver, &records);
        records.verify_loaded().await.unwrap();
        records.verify_summary().await.unwrap();
        assert_eq!(records.total_prizes().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_total_prizes_full_width_colon() {
        let driver = MockDriver::new();
        let records = page(&driver);
        driver.add_element(records.total_prizes.selector(), MockElement::new("总中奖数量：12"));
        assert_eq!(records.total_prizes().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_empty_state_needs_message() {
        let driver = MockDriver::new();
        let records = page(&driver);
        script_page(&driver, &records);
        // No rows, no empty-state message: that is a failure.
        assert!(records.verify_records_displayed().await.is_err());

        driver.add_element(records.no_records_message.selector(), MockElement::new("暂无中奖记录"));
        records.verify_records_displayed().await.unwrap();
        // Completeness passes trivially without rows.
        records.verify_record_completeness().await.unwrap();
    }

    #[tokio::test]
    async fn test_record_completeness() {
        let driver = MockDriver::new();
        let records = page(&driver);
        script_page(&driver, &records);
        driver.add_element(records.record_rows.selector(), MockElement::new("row"));
        driver.add_element(records.record_ids.selector(), MockElement::new("1"));
        driver.add_element(records.prize_names.selector(), MockElement::new("保温杯"));
        driver.add_element(records.prize_descriptions.selector(), MockElement::new("不锈钢保温杯"));
        driver.add_element(records.prize_prices.selector(), MockElement::new("¥59.9"));
        driver.add_element(records.draw_dates.selector(), MockElement::new("2026-08-01 10:00"));
        driver.add_element(records.record_statuses.selector(), MockElement::new(STATUS_WON));
        driver.add_element(
            records.prize_images.selector(),
            MockElement::new("").with_attribute("src", "/img/cup.png"),
        );
        records.verify_records_displayed().await.unwrap();
        records.verify_record_completeness().await.unwrap();

        driver.add_element(records.record_statuses.selector(), MockElement::new("待定"));
        assert!(records.verify_record_completeness().await.is_err());
    }
}
