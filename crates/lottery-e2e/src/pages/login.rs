//! Login dialog: password and verification-code tabs.

use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::WaitOptions;
use tracing::info;

/// How long to wait for the success toast before concluding the login
/// did not go through, in milliseconds
const SUCCESS_PROBE_MS: u64 = 5000;

/// The login dialog
#[derive(Debug)]
pub struct LoginPage<'d> {
    ctx: PageContext<'d>,
    /// Dialog heading
    pub login_title: Locator,
    /// "Password login" tab
    pub password_tab: Locator,
    /// "Code login" tab
    pub code_tab: Locator,
    /// Email-or-phone input on the password tab
    pub account_input: Locator,
    /// Password input
    pub password_input: Locator,
    /// Email input on the code tab
    pub email_input: Locator,
    /// Verification code input
    pub code_input: Locator,
    /// "Send code" button
    pub send_code_button: Locator,
    /// Identity select on the password tab
    pub password_identity_select: Locator,
    /// Identity select on the code tab
    pub code_identity_select: Locator,
    /// Submit button of the password form
    pub login_button: Locator,
    /// Dialog close control
    pub close_button: Locator,
    /// Error message area
    pub error_message: Locator,
    /// Success toast shown after a login goes through
    pub success_toast: Locator,
}

impl<'d> LoginPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self {
            ctx: PageContext::new(driver),
            login_title: Locator::xpath("//h2[text()='用户登录']"),
            password_tab: Locator::xpath("//button[text()='密码登录']"),
            code_tab: Locator::xpath("//button[text()='验证码登录']"),
            account_input: Locator::id("password-loginName"),
            password_input: Locator::xpath("//input[@type='password']"),
            email_input: Locator::xpath("//input[@type='email']"),
            code_input: Locator::xpath("//input[@placeholder='验证码']"),
            send_code_button: Locator::xpath("//button[text()='发送验证码']"),
            password_identity_select: Locator::id("password-identity"),
            code_identity_select: Locator::id("code-identity"),
            login_button: Locator::xpath("//*[@id=\"password-login\"]/button"),
            close_button: Locator::xpath("//span[@class='close']"),
            error_message: Locator::id("message"),
            success_toast: Locator::xpath(
                "//div[@class='success-message' and contains(text(), '登录成功')]",
            ),
        }
    }

    /// Override the wait options (used by mock tests)
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.ctx = self.ctx.with_wait(wait);
        self
    }

    /// Assert the dialog rendered with both tabs.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.login_title).await?;
        self.ctx.verify_text(&self.login_title, "用户登录").await?;
        self.ctx.verify_displayed(&self.password_tab).await?;
        self.ctx.verify_displayed(&self.code_tab).await
    }

    /// Switch to the password tab.
    pub async fn switch_to_password_login(&self) -> SuiteResult<()> {
        self.ctx.click(&self.password_tab).await?;
        self.ctx.wait_visible(&self.account_input).await
    }

    /// Switch to the verification-code tab.
    pub async fn switch_to_code_login(&self) -> SuiteResult<()> {
        self.ctx.click(&self.code_tab).await?;
        self.ctx.wait_visible(&self.email_input).await
    }

    /// Enter the email-or-phone account.
    pub async fn enter_account(&self, account: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.account_input, account).await
    }

    /// Enter the password.
    pub async fn enter_password(&self, password: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.password_input, password).await
    }

    /// Enter the email (code tab).
    pub async fn enter_email(&self, email: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.email_input, email).await
    }

    /// Enter the verification code.
    pub async fn enter_code(&self, code: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.code_input, code).await
    }

    /// Select the identity on the password tab.
    pub async fn select_password_identity(&self, identity: &str) -> SuiteResult<()> {
        self.ctx.select_by_text(&self.password_identity_select, identity).await
    }

    /// Select the identity on the code tab.
    pub async fn select_code_identity(&self, identity: &str) -> SuiteResult<()> {
        self.ctx.select_by_text(&self.code_identity_select, identity).await
    }

    /// Submit the login form.
    pub async fn click_login(&self) -> SuiteResult<()> {
        self.ctx.click(&self.login_button).await
    }

    /// Request a verification code.
    pub async fn click_send_code(&self) -> SuiteResult<()> {
        self.ctx.click(&self.send_code_button).await
    }

    /// Close the dialog.
    pub async fn close_modal(&self) -> SuiteResult<()> {
        self.ctx.click(&self.close_button).await
    }

    /// Read the error message.
    pub async fn error_message(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.error_message).await
    }

    /// Assert the error message contains `expected`.
    pub async fn verify_error_message(&self, expected: &str) -> SuiteResult<()> {
        self.ctx.verify_contains(&self.error_message, expected).await
    }

    /// Log in via the password tab.
    pub async fn login_with_password(
        &self,
        account: &str,
        password: &str,
        identity: &str,
    ) -> SuiteResult<()> {
        info!(account, identity, "password login");
        self.switch_to_password_login().await?;
        self.enter_account(account).await?;
        self.enter_password(password).await?;
        self.select_password_identity(identity).await?;
        self.click_login().await
    }

    /// Log in via the verification-code tab.
    pub async fn login_with_code(&self, email: &str, code: &str, identity: &str) -> SuiteResult<()> {
        info!(email, identity, "code login");
        self.switch_to_code_login().await?;
        self.enter_email(email).await?;
        self.enter_code(code).await?;
        self.select_code_identity(identity).await?;
        self.click_login().await
    }

    /// Probe for the success toast. Absence is `Ok(false)`, not an error.
    pub async fn login_succeeded(&self) -> SuiteResult<bool> {
        let options = self
            .ctx
            .wait_options()
            .with_timeout(SUCCESS_PROBE_MS.min(self.ctx.wait_options().timeout_ms));
        self.ctx.with_wait(options).became_visible(&self.success_toast).await
    }

    /// Assert the login did not go through: dialog still present, error shown.
    pub async fn verify_login_failed(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.login_title).await?;
        self.ctx.verify_displayed(&self.error_message).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::quick_wait;
    use super::*;
    use crate::driver::{MockDriver, MockElement};

    fn page(driver: &MockDriver) -> LoginPage<'_> {
        LoginPage::new(driver).with_wait(quick_wait())
    }

    fn script_dialog(driver: &MockDriver, page: &LoginPage<'_>) {
        driver.add_element(page.login_title.selector(), MockElement::new("用户登录"));
        driver.add_element(page.password_tab.selector(), MockElement::new("密码登录"));
        driver.add_element(page.code_tab.selector(), MockElement::new("验证码登录"));
        driver.add_element(page.account_input.selector(), MockElement::new(""));
        driver.add_element(page.password_input.selector(), MockElement::new(""));
        driver.add_element(page.password_identity_select.selector(), MockElement::new("普通用户"));
        driver.add_element(page.login_button.selector(), MockElement::new("登录"));
    }

    #[tokio::test]
    async fn test_verify_loaded() {
        let driver = MockDriver::new();
        let login = page(&driver);
        script_dialog(&driver, &login);
        login.verify_loaded().await.unwrap();
    }

    #[tokio::test]
    async fn test_login_with_password_sequences_all_steps() {
        let driver = MockDriver::new();
        let login = page(&driver);
        script_dialog(&driver, &login);

        login
            .login_with_password("user3@example.com", "123456", "普通用户")
            .await
            .unwrap();

        let history = driver.history();
        let position = |needle: &str| {
            history
                .iter()
                .position(|c| c.contains(needle))
                .unwrap_or_else(|| panic!("missing call: {needle}"))
        };
        // Tab first, credentials next, submit last.
        assert!(position("click:xpath=//button[text()='密码登录']") < position("type:id=password-loginName"));
        assert!(position("type:id=password-loginName") < position("click:xpath=//*[@id=\"password-login\"]/button"));
        assert!(position("select:id=password-identity=普通用户") < position("click:xpath=//*[@id=\"password-login\"]/button"));
        assert_eq!(
            driver.value_of(login.password_input.selector()).as_deref(),
            Some("123456")
        );
    }

    #[tokio::test]
    async fn test_login_succeeded_probe_both_ways() {
        let driver = MockDriver::new();
        let login = page(&driver);
        assert!(!login.login_succeeded().await.unwrap());

        driver.add_element(login.success_toast.selector(), MockElement::new("登录成功"));
        assert!(login.login_succeeded().await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_error_message() {
        let driver = MockDriver::new();
        let login = page(&driver);
        driver.add_element(login.error_message.selector(), MockElement::new("密码错误，请重试"));
        login.verify_error_message("密码错误").await.unwrap();
        assert!(login.verify_error_message("用户信息为空").await.is_err());
    }

    #[tokio::test]
    async fn test_verify_login_failed_requires_error() {
        let driver = MockDriver::new();
        let login = page(&driver);
        driver.add_element(login.login_title.selector(), MockElement::new("用户登录"));
        assert!(login.verify_login_failed().await.is_err());

        driver.add_element(login.error_message.selector(), MockElement::new("用户信息为空"));
        login.verify_login_failed().await.unwrap();
    }
}
