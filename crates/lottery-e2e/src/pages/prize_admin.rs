//! Prize administration: listing, add form, enable/disable.

use super::pagination::Pagination;
use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{wait_until, WaitOptions};
use std::time::Instant;
use tracing::info;

/// Load budget for the prize admin page, in milliseconds
const LOAD_BUDGET_MS: u64 = 8000;

/// The prize administration panel
#[derive(Debug)]
pub struct PrizeManagementPage<'d> {
    ctx: PageContext<'d>,
    /// Panel heading
    pub page_title: Locator,
    /// "Add prize" button
    pub add_prize_button: Locator,
    /// Table body
    pub table_body: Locator,
    /// Table rows
    pub prize_rows: Locator,
    /// ID column cells
    pub prize_ids: Locator,
    /// Name column cells
    pub prize_names: Locator,
    /// Description column cells
    pub prize_descriptions: Locator,
    /// Price column cells
    pub prize_prices: Locator,
    /// Image column images
    pub prize_images: Locator,
    /// Per-row action buttons
    pub action_buttons: Locator,
    /// "Disable" buttons
    pub disable_buttons: Locator,
    /// "Enable" buttons
    pub enable_buttons: Locator,
    /// Add-prize form heading
    pub add_prize_title: Locator,
    /// Prize name input
    pub prize_name_input: Locator,
    /// Prize description textarea
    pub prize_description_input: Locator,
    /// Prize price input
    pub prize_price_input: Locator,
    /// Prize image URL input
    pub prize_image_input: Locator,
    /// Form submit button
    pub submit_button: Locator,
    /// Form close control
    pub close_button: Locator,
    /// Pager under the table
    pub pagination: Pagination<'d>,
}

impl<'d> PrizeManagementPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        let ctx = PageContext::new(driver);
        Self {
            page_title: Locator::xpath("//*[@id=\"admin-prizes\"]/div[1]/h3"),
            add_prize_button: Locator::xpath("//button[text()='添加奖品']"),
            table_body: Locator::id("prizes-table-body"),
            prize_rows: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr"),
            prize_ids: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr/td[1]"),
            prize_names: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr/td[2]"),
            prize_descriptions: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr/td[3]"),
            prize_prices: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr/td[4]"),
            prize_images: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr/td[5]//img"),
            action_buttons: Locator::xpath("//*[@id=\"prizes-table-body\"]/tr[1]/td[6]/button"),
            disable_buttons: Locator::xpath("//button[text()='禁用']"),
            enable_buttons: Locator::xpath("//button[text()='启用']"),
            add_prize_title: Locator::xpath("//h2[text()='添加奖品']"),
            prize_name_input: Locator::id("prize-name"),
            prize_description_input: Locator::id("prize-description"),
            prize_price_input: Locator::id("prize-price"),
            prize_image_input: Locator::id("prize-image"),
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
        self.ctx.verify_text(&self.page_title, "奖品管理").await?;
        self.ctx.verify_displayed(&self.add_prize_button).await
    }

    /// Assert the table has at least one row.
    pub async fn verify_list_displayed(&self) -> SuiteResult<()> {
        let rows = self.prize_count().await?;
        if rows == 0 {
            return Err(SuiteError::AssertionFailed {
                message: "prize table is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Assert every row is complete: id/name/description non-empty, price
    /// with currency mark, image src set, action button present.
    pub async fn verify_information_completeness(&self) -> SuiteResult<()> {
        self.ctx.verify_non_empty_texts(&self.prize_ids, "prize id").await?;
        self.ctx.verify_non_empty_texts(&self.prize_names, "prize name").await?;
        self.ctx
            .verify_non_empty_texts(&self.prize_descriptions, "prize description")
            .await?;
        self.ctx.verify_texts_contain(&self.prize_prices, "¥", "prize price").await?;
        self.ctx
            .verify_attribute_present(&self.prize_images, "src", "prize image")
            .await?;
        self.ctx.verify_displayed(&self.action_buttons).await
    }

    /// Assert the pager, when rendered.
    pub async fn verify_pagination(&self) -> SuiteResult<()> {
        self.pagination.verify().await
    }

    /// Open the add-prize form.
    pub async fn open_add_prize(&self) -> SuiteResult<()> {
        self.ctx.click(&self.add_prize_button).await
    }

    /// Assert the add-prize form rendered.
    pub async fn verify_add_prize_form_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.add_prize_title).await?;
        self.ctx.verify_text(&self.add_prize_title, "添加奖品").await?;
        self.ctx.verify_displayed(&self.prize_name_input).await?;
        self.ctx.verify_displayed(&self.prize_description_input).await?;
        self.ctx.verify_displayed(&self.prize_price_input).await?;
        self.ctx.verify_displayed(&self.prize_image_input).await?;
        self.ctx.verify_displayed(&self.submit_button).await
    }

    /// Fill the add-prize form.
    pub async fn fill_prize_form(&self, name: &str, description: &str, price: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.prize_name_input, name).await?;
        self.ctx.type_text(&self.prize_description_input, description).await?;
        self.ctx.type_text(&self.prize_price_input, price).await
    }

    /// Submit the add-prize form.
    pub async fn submit_prize_form(&self) -> SuiteResult<()> {
        self.ctx.click(&self.submit_button).await
    }

    /// Wait for the new prize to show up in the table.
    pub async fn verify_prize_added(&self, expected_name: &str) -> SuiteResult<()> {
        let driver = self.ctx.driver();
        let selector = self.prize_names.selector();
        wait_until(
            self.ctx.wait_options(),
            &format!("prize '{expected_name}' listed"),
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

    /// Disable the first prize. Confirm dialogs are answered positively.
    pub async fn disable_first_prize(&self) -> SuiteResult<()> {
        if self.ctx.driver().exists(self.disable_buttons.selector()).await? {
            info!("disable first prize");
            self.ctx.driver().arm_dialogs(true).await?;
            self.ctx.click(&self.disable_buttons).await?;
        }
        Ok(())
    }

    /// Enable the first prize. Confirm dialogs are answered positively.
    pub async fn enable_first_prize(&self) -> SuiteResult<()> {
        if self.ctx.driver().exists(self.enable_buttons.selector()).await? {
            info!("enable first prize");
            self.ctx.driver().arm_dialogs(true).await?;
            self.ctx.click(&self.enable_buttons).await?;
        }
        Ok(())
    }

    /// Wait for the first row's action button to flip to the opposite
    /// label: a disabled prize offers `启用`, an enabled one `禁用`.
    pub async fn verify_status_updated(&self, expected_status: &str) -> SuiteResult<()> {
        let expected_button = match expected_status {
            "禁用" => "启用",
            "启用" => "禁用",
            other => {
                return Err(SuiteError::AssertionFailed {
                    message: format!("unknown prize status: '{other}'"),
                })
            }
        };
        let driver = self.ctx.driver();
        let selector = self.action_buttons.selector();
        wait_until(
            self.ctx.wait_options(),
            &format!("first prize action button reads '{expected_button}'"),
            move || async move {
                Ok(driver
                    .text_of(selector)
                    .await?
                    .is_some_and(|label| label == expected_button))
            },
        )
        .await?;
        Ok(())
    }

    /// Number of table rows.
    pub async fn prize_count(&self) -> SuiteResult<usize> {
        self.ctx.driver().count(self.prize_rows.selector()).await
    }

    /// ID of the first row, when any.
    pub async fn first_prize_id(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_ids).await?.into_iter().next())
    }

    /// Name of the first row, when any.
    pub async fn first_prize_name(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_names).await?.into_iter().next())
    }

    /// Price of the first row, when any.
    pub async fn first_prize_price(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_prices).await?.into_iter().next())
    }

    /// Assert the panel settles inside its load budget.
    pub async fn verify_load_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.verify_loaded().await?;
        self.ctx.verify_within("prize admin load", start.elapsed(), LOAD_BUDGET_MS)
    }
}
