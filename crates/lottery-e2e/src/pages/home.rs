//! Home page: hero section, navigation bar, login state.

use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::WaitOptions;
use std::time::Instant;

/// Load budget for the home page, in milliseconds
const LOAD_BUDGET_MS: u64 = 5000;

/// The landing page
#[derive(Debug)]
pub struct HomePage<'d> {
    ctx: PageContext<'d>,
    /// Site logo in the navigation bar
    pub logo: Locator,
    /// "Home" navigation link
    pub home_link: Locator,
    /// Prize administration button in the admin panel
    pub prize_admin_button: Locator,
    /// "Activities" navigation link
    pub activities_link: Locator,
    /// Activity administration button in the admin panel
    pub activity_admin_button: Locator,
    /// Admin area navigation link
    pub admin_link: Locator,
    /// Login button shown while anonymous
    pub login_button: Locator,
    /// Register button shown while anonymous
    pub register_button: Locator,
    /// User dropdown shown once logged in
    pub user_menu: Locator,
    /// Logged-in display name
    pub user_name: Locator,
    /// "My prizes" dropdown entry
    pub my_prizes_link: Locator,
    /// "Log out" dropdown entry
    pub logout_link: Locator,
    /// Hero headline
    pub main_title: Locator,
    /// Hero description paragraph
    pub main_description: Locator,
    /// Feature highlights section
    pub features_section: Locator,
    /// Visual showcase section
    pub visual_section: Locator,
}

impl<'d> HomePage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self {
            ctx: PageContext::new(driver),
            logo: Locator::xpath("//div[@class='nav-logo']"),
            home_link: Locator::xpath("//a[@href='#home']"),
            prize_admin_button: Locator::xpath("//*[@id=\"admin\"]/div/div[1]/button[1]"),
            activities_link: Locator::xpath("//a[@href='#activities']"),
            activity_admin_button: Locator::xpath("//*[@id=\"admin\"]/div/div[1]/button[2]"),
            admin_link: Locator::xpath("//a[@href='#admin']"),
            login_button: Locator::xpath("//button[text()='登录']"),
            register_button: Locator::xpath("//button[text()='注册']"),
            user_menu: Locator::xpath("//div[@class='nav-user']"),
            user_name: Locator::xpath("//span[@id='user-name']"),
            my_prizes_link: Locator::xpath("//a[text()='我的奖品']"),
            logout_link: Locator::xpath("//a[text()='退出登录']"),
            main_title: Locator::xpath("//h1[text()='开启你的幸运之旅']"),
            main_description: Locator::xpath("//p[contains(text(), '参与精彩抽奖活动')]"),
            features_section: Locator::xpath("//div[@class='hero-features']"),
            visual_section: Locator::xpath("//div[@class='hero-visual']"),
        }
    }

    /// Override the wait options (used by mock tests)
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.ctx = self.ctx.with_wait(wait);
        self
    }

    /// Assert the hero content rendered.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.logo).await?;
        self.ctx.verify_displayed(&self.main_title).await?;
        self.ctx.verify_displayed(&self.main_description).await?;
        self.ctx.verify_displayed(&self.features_section).await?;
        self.ctx.verify_displayed(&self.visual_section).await
    }

    /// Assert the navigation bar essentials are present.
    pub async fn verify_navigation(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.home_link).await?;
        self.ctx.verify_displayed(&self.login_button).await?;
        self.ctx.verify_displayed(&self.register_button).await?;
        self.ctx.verify_displayed(&self.logo).await
    }

    /// Assert the anonymous state: auth buttons visible, user menu hidden.
    pub async fn verify_not_logged_in(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.login_button).await?;
        self.ctx.verify_displayed(&self.register_button).await?;
        self.ctx.verify_hidden(&self.user_menu).await
    }

    /// Assert the logged-in state and the displayed user name. Waits for
    /// the user menu first; the auth buttons disappear with it.
    pub async fn verify_logged_in(&self, expected_name: &str) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.user_menu).await?;
        self.ctx.verify_text(&self.user_name, expected_name).await?;
        self.ctx.verify_hidden(&self.login_button).await?;
        self.ctx.verify_hidden(&self.register_button).await
    }

    /// Open the login dialog.
    pub async fn open_login(&self) -> SuiteResult<()> {
        self.ctx.click(&self.login_button).await
    }

    /// Open the registration dialog.
    pub async fn open_register(&self) -> SuiteResult<()> {
        self.ctx.click(&self.register_button).await
    }

    /// Open the prize administration panel.
    pub async fn open_prize_admin(&self) -> SuiteResult<()> {
        self.ctx.click(&self.prize_admin_button).await
    }

    /// Open the activities section.
    pub async fn open_activities(&self) -> SuiteResult<()> {
        self.ctx.click(&self.activities_link).await
    }

    /// Open the activity administration panel.
    pub async fn open_activity_admin(&self) -> SuiteResult<()> {
        self.ctx.click(&self.activity_admin_button).await
    }

    /// Open the admin area.
    pub async fn open_admin(&self) -> SuiteResult<()> {
        self.ctx.click(&self.admin_link).await
    }

    /// Open the user dropdown.
    pub async fn open_user_menu(&self) -> SuiteResult<()> {
        self.ctx.click(&self.user_menu).await
    }

    /// Open "my prizes" from the user dropdown.
    pub async fn open_my_prizes(&self) -> SuiteResult<()> {
        self.ctx.click(&self.my_prizes_link).await
    }

    /// Log out via the user dropdown.
    pub async fn logout(&self) -> SuiteResult<()> {
        self.ctx.click(&self.logout_link).await
    }

    /// Enter the draw page of the n-th activity card (1-based).
    pub async fn open_activity_draw(&self, card: usize) -> SuiteResult<()> {
        let button =
            Locator::xpath(format!("//*[@id=\"activities-grid\"]/div[{card}]/div[3]/button"));
        self.ctx.click(&button).await
    }

    /// Assert the document title names the lottery system.
    pub async fn verify_page_title(&self) -> SuiteResult<()> {
        self.ctx.verify_title_contains("抽奖管理系统").await
    }

    /// Assert hero headline/description content.
    pub async fn verify_main_features(&self) -> SuiteResult<()> {
        self.ctx.verify_displayed(&self.features_section).await?;
        self.ctx.verify_displayed(&self.visual_section).await?;
        self.ctx.verify_text(&self.main_title, "开启你的幸运之旅").await?;
        self.ctx.verify_contains(&self.main_description, "参与精彩抽奖活动").await
    }

    /// Assert the page settles inside its load budget.
    pub async fn verify_load_performance(&self) -> SuiteResult<()> {
        let start = Instant::now();
        self.verify_loaded().await?;
        self.ctx.verify_within("home page load", start.elapsed(), LOAD_BUDGET_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::quick_wait;
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn page(driver: &MockDriver) -> HomePage<'_> {
        HomePage::new(driver).with_wait(quick_wait())
    }

    fn script_loaded(driver: &MockDriver, page: &HomePage<'_>) {
        driver.add_element(page.logo.selector(), MockElement::new("幸运抽奖"));
        driver.add_element(page.main_title.selector(), MockElement::new("开启你的幸运之旅"));
        driver.add_element(
            page.main_description.selector(),
            MockElement::new("参与精彩抽奖活动，赢取丰厚奖品"),
        );
        driver.add_element(page.features_section.selector(), MockElement::new("features"));
        driver.add_element(page.visual_section.selector(), MockElement::new("visual"));
    }

    #[tokio::test]
    async fn test_verify_loaded() {
        let driver = MockDriver::new();
        let home = page(&driver);
        script_loaded(&driver, &home);
        home.verify_loaded().await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_loaded_fails_without_hero() {
        let driver = MockDriver::new();
        let home = page(&driver);
        driver.add_element(home.logo.selector(), MockElement::new("幸运抽奖"));
        assert!(home.verify_loaded().await.is_err());
    }

    #[tokio::test]
    async fn test_anonymous_vs_logged_in() {
        let driver = MockDriver::new();
        let home = page(&driver);
        driver.add_element(home.login_button.selector(), MockElement::new("登录"));
        driver.add_element(home.register_button.selector(), MockElement::new("注册"));
        home.verify_not_logged_in().await.unwrap();

        // After login the auth buttons give way to the user menu.
        driver.remove_elements(home.login_button.selector());
        driver.remove_elements(home.register_button.selector());
        driver.add_element(home.user_menu.selector(), MockElement::new("用户3"));
        driver.add_element(home.user_name.selector(), MockElement::new("用户3"));
        home.verify_logged_in("用户3").await.unwrap();
    }

    #[tokio::test]
    async fn test_open_login_clicks_button() {
        let driver = MockDriver::new();
        let home = page(&driver);
        driver.add_element(home.login_button.selector(), MockElement::new("登录"));
        home.open_login().await.unwrap();
        assert!(driver.was_called("click:xpath=//button[text()='登录']"));
    }

    #[tokio::test]
    async fn test_open_activity_draw_builds_card_xpath() {
        let driver = MockDriver::new();
        let home = page(&driver);
        let button = Locator::xpath("//*[@id=\"activities-grid\"]/div[2]/div[3]/button");
        driver.add_element(button.selector(), MockElement::new("去抽奖"));
        home.open_activity_draw(2).await.unwrap();
        assert!(driver.was_called("click:xpath=//*[@id=\"activities-grid\"]/div[2]"));
    }

    #[tokio::test]
    async fn test_page_title() {
        let driver = MockDriver::new();
        driver.set_title("抽奖管理系统");
        let home = page(&driver);
        home.verify_page_title().await.unwrap();
    }
}
