//! Draw page: nine-cell grid, draw button, result dialog.

use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::WaitOptions;
use std::time::Instant;
use tracing::info;

/// Load budget for the draw page, in milliseconds
const LOAD_BUDGET_MS: u64 = 8000;
/// Budget for a draw round trip, in milliseconds
const DRAW_BUDGET_MS: u64 = 5000;

/// The draw page
#[derive(Debug)]
pub struct LotteryPage<'d> {
    ctx: PageContext<'d>,
    /// Remaining-chances panel
    pub chances_panel: Locator,
    /// The draw grid
    pub grid: Locator,
    /// The grid's cells
    pub grid_cells: Locator,
    /// Texts inside the grid cells
    pub grid_cell_texts: Locator,
    /// The draw button
    pub draw_button: Locator,
    /// Result dialog container
    pub draw_result: Locator,
    /// Result dialog heading
    pub result_title: Locator,
    /// Result dialog message
    pub result_message: Locator,
    /// Result dialog image
    pub result_image: Locator,
    /// Result dialog dismiss button
    pub result_button: Locator,
    /// User info panel
    pub user_info: Locator,
    /// Displayed user name
    pub user_name: Locator,
    /// Remaining chances counter
    pub remaining_chances: Locator,
    /// Center cell, which carries the activity info
    pub activity_cell: Locator,
    /// Prize list images
    pub prize_images: Locator,
    /// Prize list names
    pub prize_names: Locator,
    /// Prize list descriptions
    pub prize_descriptions: Locator,
    /// Prize list prices
    pub prize_prices: Locator,
    /// Loading indicator
    pub loading_indicator: Locator,
    /// Error message area
    pub error_message: Locator,
}

impl<'d> LotteryPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self {
            ctx: PageContext::new(driver),
            chances_panel: Locator::xpath("//div[@class='chances']"),
            grid: Locator::id("lotteryGrid"),
            grid_cells: Locator::xpath("//*[@id=\"lotteryGrid\"]/div"),
            grid_cell_texts: Locator::xpath(
                "//div[@id='lotteryGrid']//div[contains(@class, 'grid-item')]//span",
            ),
            draw_button: Locator::id("drawBtn"),
            draw_result: Locator::xpath("//div[@id='draw-result']"),
            result_title: Locator::xpath("//div[@id='draw-result']//h3"),
            result_message: Locator::xpath("//div[@id='draw-result']//p"),
            result_image: Locator::xpath("//div[@id='draw-result']//img"),
            result_button: Locator::xpath("//*[@id=\"modalContent\"]/button"),
            user_info: Locator::xpath("//div[@id='user-info']"),
            user_name: Locator::xpath("//div[@id='user-info']//span[@id='user-name']"),
            remaining_chances: Locator::id("remainingChances"),
            activity_cell: Locator::xpath("//*[@id=\"lotteryGrid\"]/div[5]"),
            prize_images: Locator::xpath("//div[@id='prizes-info']//div[@class='prize-item']//img"),
            prize_names: Locator::xpath("//div[@id='prizes-info']//div[@class='prize-item']//span"),
            prize_descriptions: Locator::xpath(
                "//div[@id='prizes-info']//div[@class='prize-item']//p",
            ),
            prize_prices: Locator::xpath(
                "//div[@id='prizes-info']//div[@class='prize-item']//strong",
            ),
            loading_indicator: Locator::xpath("//div[@id='loading']"),
            error_message: Locator::xpath("//div[@id='error-message']"),
        }
    }

    /// Override the wait options (used by mock tests)
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.ctx = self.ctx.with_wait(wait);
        self
    }

    /// Assert the page rendered its chances panel.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.chances_panel).await
    }

    /// Assert the grid rendered with at least one cell.
    pub async fn verify_grid_displayed(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.grid).await?;
        let cells = self.ctx.driver().count(self.grid_cells.selector()).await?;
        if cells == 0 {
            return Err(SuiteError::AssertionFailed {
                message: "draw grid has no cells".to_string(),
            });
        }
        Ok(())
    }

    /// Assert every grid cell text is non-empty.
    pub async fn verify_grid_item_texts(&self) -> SuiteResult<()> {
        self.ctx.verify_non_empty_texts(&self.grid_cell_texts, "grid cell text").await
    }

    /// Assert the user panel rendered with a name and a chances counter.
    pub async fn verify_user_info(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.user_info).await?;
        self.ctx.verify_displayed(&self.user_name).await?;
        self.ctx.verify_displayed(&self.remaining_chances).await?;
        let name = self.ctx.text_of(&self.user_name).await?;
        if name.is_empty() {
            return Err(SuiteError::AssertionFailed {
                message: "user name must not be empty".to_string(),
            });
        }
        self.ctx.verify_contains(&self.chances_panel, "剩余抽奖次数").await
    }

    /// Assert the activity cell carries a name and description.
    pub async fn verify_activity_info(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.activity_cell).await?;
        let text = self.ctx.text_of(&self.activity_cell).await?;
        if text.is_empty() {
            return Err(SuiteError::AssertionFailed {
                message: "activity info must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Assert the prize area rendered.
    pub async fn verify_prizes_info(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.grid).await
    }

    /// Assert prize entries are complete: image src set, name/description
    /// non-empty, price carries the currency mark.
    pub async fn verify_prize_completeness(&self) -> SuiteResult<()> {
        self.ctx
            .verify_attribute_present(&self.prize_images, "src", "prize image")
            .await?;
        self.ctx.verify_non_empty_texts(&self.prize_names, "prize name").await?;
        self.ctx
            .verify_non_empty_texts(&self.prize_descriptions, "prize description")
            .await?;
        self.ctx
            .verify_texts_contain(&self.prize_prices, "¥", "prize price")
            .await
    }

    /// Click the draw button.
    pub async fn click_draw(&self) -> SuiteResult<()> {
        info!("draw");
        self.ctx.click(&self.draw_button).await
    }

    /// Assert the draw button's enabled state.
    pub async fn verify_draw_button_enabled(&self, expected: bool) -> SuiteResult<()> {
        let enabled = self.ctx.driver().is_enabled(self.draw_button.selector()).await?;
        if enabled == expected {
            Ok(())
        } else {
            Err(SuiteError::assertion("draw button enabled", expected, enabled))
        }
    }

    /// Assert the result dialog appeared.
    pub async fn verify_draw_result(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.result_button).await
    }

    /// Assert the result dialog content.
    pub async fn verify_draw_result_information(
        &self,
        expected_title: &str,
        expected_message: &str,
    ) -> SuiteResult<()> {
        self.ctx.verify_text(&self.result_title, expected_title).await?;
        self.ctx.verify_text(&self.result_message, expected_message).await
    }

    /// Assert the result dialog image has a source.
    pub async fn verify_draw_result_image(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.result_image).await?;
        self.ctx
            .verify_attribute_present(&self.result_image, "src", "draw result image")
            .await
    }

    /// Dismiss the result dialog.
    pub async fn click_draw_result_button(&self) -> SuiteResult<()> {
        self.ctx.click(&self.result_button).await
    }

    /// Assert the error message content.
    pub async fn verify_error_message(&self, expected: &str) -> SuiteResult<()> {
        self.ctx.verify_text(&self.error_message, expected).await
    }

    /// Read the remaining-chances counter.
    pub async fn remaining_chances(&self) -> SuiteResult<u32> {
        let text = self.ctx.text_of(&self.remaining_chances).await?;
        text.trim().parse().map_err(|_| SuiteError::AssertionFailed {
            message: format!("remaining chances is not a number: '{text}'"),
        })
    }

    /// Read the activity name from the center cell.
    pub async fn activity_name(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.activity_cell).await
    }

    /// Number of listed prizes.
    pub async fn prize_count(&self) -> SuiteResult<usize> {
        self.ctx.driver().count(self.prize_names.selector()).await
    }

    /// Name of the first listed prize, when any.
    pub async fn first_prize_name(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_names).await?.into_iter().next())
    }

    /// Price of the first listed prize, when any.
    pub async fn first_prize_price(&self) -> SuiteResult<Option<String>> {
        Ok(self.ctx.texts_of(&self.prize_prices).await?.into_iter().next())
    }

    /// Assert the page settles inside its load budget.
    pub async fn verify_load_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.verify_loaded().await?;
        self.ctx.verify_within("draw page load", start.elapsed(), LOAD_BUDGET_MS)
    }

    /// Assert a draw round trip settles inside its budget.
    pub async fn verify_draw_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.click_draw().await?;
        self.verify_draw_result().await?;
        self.ctx.verify_within("draw round trip", start.elapsed(), DRAW_BUDGET_MS)
    }
}
