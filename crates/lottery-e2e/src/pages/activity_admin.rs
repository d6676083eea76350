//! Activity administration: listing, create form, ending activities.

use super::pagination::Pagination;
use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{wait_until, WaitOptions};
use std::time::Instant;
use tracing::info;

/// Load budget for the activity admin page, in milliseconds
const LOAD_BUDGET_MS: u64 = 8000;

/// Activity status while a draw is open
pub const STATUS_RUNNING: &str = "进行中";
/// Activity status once ended
pub const STATUS_ENDED: &str = "已结束";

/// The activity administration panel
#[derive(Debug)]
pub struct ActivityManagementPage<'d> {
    ctx: PageContext<'d>,
    /// Panel heading
    pub page_title: Locator,
    /// "Create activity" button
    pub create_activity_button: Locator,
    /// Table body
    pub table_body: Locator,
    /// Table rows
    pub activity_rows: Locator,
    /// ID column cells
    pub activity_ids: Locator,
    /// Name column cells
    pub activity_names: Locator,
    /// Description column cells
    pub activity_descriptions: Locator,
    /// End-date column cells
    pub activity_end_dates: Locator,
    /// Status column cells
    pub activity_statuses: Locator,
    /// "End activity" buttons on the first row
    pub end_activity_buttons: Locator,
    /// Create-activity form heading
    pub create_activity_title: Locator,
    /// Activity name input
    pub activity_name_input: Locator,
    /// Activity description textarea
    pub activity_description_input: Locator,
    /// Form submit button
    pub submit_button: Locator,
    /// Form close control
    pub close_button: Locator,
    /// Pager under the table
    pub pagination: Pagination<'d>,
}

impl<'d> ActivityManagementPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        let ctx = PageContext::new(driver);
        Self {
            page_title: Locator::xpath("//h3[text()='活动管理']"),
            create_activity_button: Locator::xpath("//button[text()='创建活动']"),
            table_body: Locator::id("activities-table-body"),
            activity_rows: Locator::xpath("//*[@id=\"activities-table-body\"]/tr"),
            activity_ids: Locator::xpath("//*[@id=\"activities-table-body\"]/tr/td[1]"),
            activity_names: Locator::xpath("//*[@id=\"activities-table-body\"]/tr/td[2]"),
            activity_descriptions: Locator::xpath("//*[@id=\"activities-table-body\"]/tr/td[3]"),
            activity_end_dates: Locator::xpath("//*[@id=\"activities-table-body\"]/tr/td[4]"),
            activity_statuses: Locator::xpath("//*[@id=\"activities-table-body\"]/tr/td[5]"),
            end_activity_buttons: Locator::xpath(
                "//*[@id=\"activities-table-body\"]/tr[1]/td[6]/button",
            ),
            create_activity_title: Locator::xpath("//h2[text()='创建活动']"),
            activity_name_input: Locator::id("activity-name"),
            activity_description_input: Locator::id("activity-description"),
            submit_button: Locator::xpath("//button[@type='submit']"),
            close_button: Locator::xpath("//span[@class='close']"),
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

    /// Assert the panel rendered.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.page_title).await?;
        self.ctx.verify_text(&self.page_title, "活动管理").await?;
        self.ctx.verify_displayed(&self.create_activity_button).await
    }

    /// Assert the table has at least one row.
    pub async fn verify_list_displayed(&self) -> SuiteResult<()> {
        let rows = self.activity_count().await?;
        if rows == 0 {
            return Err(SuiteError::AssertionFailed {
                message: "activity table is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Assert every row is complete and every status is a known one.
    pub async fn verify_information_completeness(&self) -> SuiteResult<()> {
        self.ctx.verify_non_empty_texts(&self.activity_ids, "activity id").await?;
        self.ctx.verify_non_empty_texts(&self.activity_names, "activity name").await?;
        self.ctx
            .verify_non_empty_texts(&self.activity_descriptions, "activity description")
            .await?;
        self.ctx
            .verify_non_empty_texts(&self.activity_end_dates, "activity end date")
            .await?;
        for status in self.ctx.texts_of(&self.activity_statuses).await? {
            if status != STATUS_RUNNING && status != STATUS_ENDED {
                return Err(SuiteError::AssertionFailed {
                    message: format!("unknown activity status: '{status}'"),
                });
            }
        }
        Ok(())
    }

    /// Assert the pager, when rendered.
    pub async fn verify_pagination(&self) -> SuiteResult<()> {
        self.pagination.verify().await
    }

    /// Open the create-activity form.
    pub async fn open_create_activity(&self) -> SuiteResult<()> {
        self.ctx.click(&self.create_activity_button).await
    }

    /// Assert the create-activity form rendered.
    pub async fn verify_create_form_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.create_activity_title).await?;
        self.ctx.verify_text(&self.create_activity_title, "创建活动").await?;
        self.ctx.verify_displayed(&self.activity_name_input).await?;
        self.ctx.verify_displayed(&self.activity_description_input).await?;
        self.ctx.verify_displayed(&self.submit_button).await
    }

    /// Fill the create-activity form.
    pub async fn fill_activity_form(&self, name: &str, description: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.activity_name_input, name).await?;
        self.ctx.type_text(&self.activity_description_input, description).await
    }

    /// Submit the create-activity form.
    pub async fn submit_activity_form(&self) -> SuiteResult<()> {
        self.ctx.click(&self.submit_button).await
    }

    /// Wait for the new activity to show up in the table.
    pub async fn verify_activity_created(&self, expected_name: &str) -> SuiteResult<()> {
        let driver = self.ctx.driver();
        let selector = self.activity_names.selector();
        wait_until(
            self.ctx.wait_options(),
            &format!("activity '{expected_name}' listed"),
            move || async move {
                Ok(driver
                    .texts_of(selector)
                    .await?
                    .iter()
                    .any(|name| name == expected_name))
            },
        )
        .await?;
        Ok(())
    }

    /// End the first activity. Confirm dialogs are answered positively.
    pub async fn end_first_activity(&self) -> SuiteResult<()> {
        if self.ctx.driver().exists(self.end_activity_buttons.selector()).await? {
            info!("end first activity");
            self.ctx.driver().arm_dialogs(true).await?;
            self.ctx.click(&self.end_activity_buttons).await?;
        }
        Ok(())
    }

    /// Wait until the first row's status reads `expected_status`.
    pub async fn verify_status_updated(&self, expected_status: &str) -> SuiteResult<()> {
        let driver = self.ctx.driver();
        let selector = self.activity_statuses.selector();
        wait_until(
            self.ctx.wait_options(),
            &format!("first activity status '{expected_status}'"),
            move || async move {
                Ok(driver
                    .text_of(selector)
                    .await?
                    .is_some_and(|status| status == expected_status))
            },
        )
        .await?;
        Ok(())
    }

    /// Number of table rows.
    pub async fn activity_count(&self) -> SuiteResult<usize> {
        self.ctx.driver().count(self.activity_rows.selector()).await
    }

    /// ID of the first row, when any.
    pub async fn first_activity_id(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.activity_ids).await?.into_iter().next())
    }

    /// Name of the first row, when any.
    pub async fn first_activity_name(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.activity_names).await?.into_iter().next())
    }

    /// Status of the first row, when any.
    pub async fn first_activity_status(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.activity_statuses).await?.into_iter().next())
    }

    /// Assert the panel settles inside its load budget.
    pub async fn verify_load_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.verify_loaded().await?;
        self.ctx.verify_within("activity admin load", start.elapsed(), LOAD_BUDGET_MS)
    }
}
