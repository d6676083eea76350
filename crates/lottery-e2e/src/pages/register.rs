//! Registration dialog.

use super::PageContext;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::SuiteResult;
use crate::wait::WaitOptions;
use tracing::info;

/// How long to wait for the success toast, in milliseconds
const SUCCESS_PROBE_MS: u64 = 10_000;

/// The registration dialog
#[derive(Debug)]
pub struct RegisterPage<'d> {
    ctx: PageContext<'d>,
    /// Dialog heading
    pub register_title: Locator,
    /// Username input
    pub username_input: Locator,
    /// Email input
    pub email_input: Locator,
    /// Phone input
    pub phone_input: Locator,
    /// Password input
    pub password_input: Locator,
    /// Password confirmation input
    pub confirm_password_input: Locator,
    /// Identity select
    pub identity_select: Locator,
    /// Submit button
    pub register_button: Locator,
    /// Dialog close control
    pub close_button: Locator,
    /// Error message area
    pub error_message: Locator,
    /// Success message area
    pub success_message: Locator,
    /// Success toast shown after registration goes through
    pub success_toast: Locator,
}

impl<'d> RegisterPage<'d> {
    /// Build the page over a driver session
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self {
            ctx: PageContext::new(driver),
            register_title: Locator::xpath("//h2[text()='用户注册']"),
            username_input: Locator::id("register-name"),
            email_input: Locator::id("register-mail"),
            phone_input: Locator::id("register-phoneNumber"),
            password_input: Locator::id("register-password"),
            confirm_password_input: Locator::id("register-confirmPassword"),
            identity_select: Locator::id("register-identity"),
            register_button: Locator::xpath("//*[@id=\"register-form\"]/button"),
            close_button: Locator::xpath("//span[@class='close']"),
            error_message: Locator::id("message"),
            success_message: Locator::xpath("//div[@class='success-message']"),
            success_toast: Locator::xpath(
                "//div[@class='success-message' and contains(text(), '注册成功')]",
            ),
        }
    }

    /// Override the wait options (used by mock tests)
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.ctx = self.ctx.with_wait(wait);
        self
    }

    /// Assert the dialog rendered with every field.
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.register_title).await?;
        self.ctx.verify_text(&self.register_title, "用户注册").await?;
        self.ctx.verify_displayed(&self.username_input).await?;
        self.ctx.verify_displayed(&self.email_input).await?;
        self.ctx.verify_displayed(&self.phone_input).await?;
        self.ctx.verify_displayed(&self.password_input).await?;
        self.ctx.verify_displayed(&self.confirm_password_input).await?;
        self.ctx.verify_displayed(&self.identity_select).await
    }

    /// Enter the username.
    pub async fn enter_username(&self, username: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.username_input, username).await
    }

    /// Enter the email.
    pub async fn enter_email(&self, email: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.email_input, email).await
    }

    /// Enter the phone number.
    pub async fn enter_phone(&self, phone: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.phone_input, phone).await
    }

    /// Enter the password.
    pub async fn enter_password(&self, password: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.password_input, password).await
    }

    /// Enter the password confirmation.
    pub async fn enter_confirm_password(&self, confirm: &str) -> SuiteResult<()> {
        self.ctx.type_text(&self.confirm_password_input, confirm).await
    }

    /// Select the identity.
    pub async fn select_identity(&self, identity: &str) -> SuiteResult<()> {
        self.ctx.select_by_text(&self.identity_select, identity).await
    }

    /// Submit the form.
    pub async fn click_register(&self) -> SuiteResult<()> {
        self.ctx.click(&self.register_button).await
    }

    /// Close the dialog.
    pub async fn close_modal(&self) -> SuiteResult<()> {
        self.ctx.click(&self.close_button).await
    }

    /// Read the error message.
    pub async fn error_message(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.error_message).await
    }

    /// Read the success message.
    pub async fn success_message(&self) -> SuiteResult<String> {
        self.ctx.text_of(&self.success_message).await
    }

    /// Assert the error message contains `expected`.
    pub async fn verify_error_message(&self, expected: &str) -> SuiteResult<()> {
        self.ctx.verify_contains(&self.error_message, expected).await
    }

    /// Assert the success message contains `expected`.
    pub async fn verify_success_message(&self, expected: &str) -> SuiteResult<()> {
        self.ctx.verify_contains(&self.success_message, expected).await
    }

    /// Fill and submit the whole form.
    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        phone: &str,
        password: &str,
        confirm_password: &str,
        identity: &str,
    ) -> SuiteResult<()> {
        info!(username, email, identity, "register");
        self.enter_username(username).await?;
        self.enter_email(email).await?;
        self.enter_phone(phone).await?;
        self.enter_password(password).await?;
        self.enter_confirm_password(confirm_password).await?;
        self.select_identity(identity).await?;
        self.click_register().await
    }

    /// Probe for the success toast. Absence is `Ok(false)`, not an error.
    pub async fn registration_succeeded(&self) -> SuiteResult<bool> {
        let options = self
            .ctx
            .wait_options()
            .with_timeout(SUCCESS_PROBE_MS.min(self.ctx.wait_options().timeout_ms));
        self.ctx.with_wait(options).became_visible(&self.success_toast).await
    }

    /// Assert the registration did not go through.
    pub async fn verify_register_failed(&self) -> SuiteResult<()> {
        self.ctx.wait_visible(&self.register_title).await?;
        self.ctx.verify_displayed(&self.error_message).await
    }

    /// Clear every input.
    pub async fn clear_all_fields(&self) -> SuiteResult<()> {
        self.ctx.clear(&self.username_input).await?;
        self.ctx.clear(&self.email_input).await?;
        self.ctx.clear(&self.phone_input).await?;
        self.ctx.clear(&self.password_input).await?;
        self.ctx.clear(&self.confirm_password_input).await
    }
}
