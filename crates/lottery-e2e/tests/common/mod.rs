//! Shared setup for the live end-to-end scenarios.
#![allow(dead_code)]

use lottery_e2e::pages::{HomePage, LoginPage};
use lottery_e2e::{
    Browser, CdpDriver, Driver, ScreenshotDir, SuiteConfig, SuiteError, SuiteResult,
};

/// Identity label for a regular user in the login form
pub const USER_IDENTITY: &str = "普通用户";
/// Identity label for an administrator in the login form
pub const ADMIN_IDENTITY: &str = "管理员";

/// Load the suite configuration and install tracing.
pub fn config() -> SuiteConfig {
    lottery_e2e::init_tracing();
    SuiteConfig::from_env().expect("test-config.yaml must load")
}

/// Launch a browser and open one page session.
pub async fn launch(config: &SuiteConfig) -> (Browser, CdpDriver) {
    let browser = Browser::launch(config.browser.clone())
        .await
        .expect("browser must launch");
    let driver = browser.new_session().await.expect("session must open");
    (browser, driver)
}

/// The screenshot directory from the configuration, pruned of captures
/// older than the retention window.
pub fn screenshots(config: &SuiteConfig) -> ScreenshotDir {
    let shots =
        ScreenshotDir::new(config.screenshot_dir.clone()).expect("screenshot dir must be creatable");
    let _ = shots.cleanup(lottery_e2e::screenshot::DEFAULT_RETENTION);
    shots
}

/// Navigate to the home page and wait for its hero content.
pub async fn open_home(driver: &CdpDriver, config: &SuiteConfig) -> SuiteResult<()> {
    driver.navigate(&config.base_url).await?;
    HomePage::new(driver).verify_loaded().await
}

/// Log in from the home page with the given credentials.
async fn login(
    driver: &CdpDriver,
    config: &SuiteConfig,
    email: &str,
    password: &str,
    identity: &str,
) -> SuiteResult<()> {
    open_home(driver, config).await?;
    HomePage::new(driver).open_login().await?;

    let login = LoginPage::new(driver);
    login.verify_loaded().await?;
    login.login_with_password(email, password, identity).await?;
    if login.login_succeeded().await? {
        Ok(())
    } else {
        Err(SuiteError::AssertionFailed {
            message: format!("login as {email} did not produce a success toast"),
        })
    }
}

/// Log in as the configured regular user.
pub async fn login_as_user(driver: &CdpDriver, config: &SuiteConfig) -> SuiteResult<()> {
    login(driver, config, &config.user.email, &config.user.password, USER_IDENTITY).await
}

/// Log in as the configured administrator.
pub async fn login_as_admin(driver: &CdpDriver, config: &SuiteConfig) -> SuiteResult<()> {
    login(driver, config, &config.admin.email, &config.admin.password, ADMIN_IDENTITY).await
}
