//! Authentication scenarios: registration, login, logout.
//!
//! These drive the deployed application through a real browser and are
//! ignored by default; run them with `cargo test -- --ignored` against a
//! reachable deployment.

mod common;

use lottery_e2e::data;
use lottery_e2e::pages::{HomePage, LoginPage, RegisterPage};
use lottery_e2e::Scenario;

const DEFAULT_PASSWORD: &str = "123456";

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn home_page_loads() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("home_page_loads")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            let home = HomePage::new(&driver);
            home.verify_page_title().await?;
            home.verify_navigation().await?;
            home.verify_main_features().await?;
            home.verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn user_registration_succeeds() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("user_registration_succeeds")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_register().await?;

            let register = RegisterPage::new(&driver);
            register.verify_loaded().await?;
            register
                .register(
                    &data::unique_username(),
                    &data::unique_email(),
                    &data::unique_phone(),
                    DEFAULT_PASSWORD,
                    DEFAULT_PASSWORD,
                    common::USER_IDENTITY,
                )
                .await?;

            if register.registration_succeeded().await? {
                Ok(())
            } else {
                Err(lottery_e2e::SuiteError::AssertionFailed {
                    message: "registration success toast never appeared".to_string(),
                })
            }
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn registration_with_existing_email_fails() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("registration_with_existing_email_fails")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_register().await?;

            let register = RegisterPage::new(&driver);
            register.verify_loaded().await?;
            register
                .register(
                    &data::unique_username(),
                    &config.existing.email,
                    &data::unique_phone(),
                    DEFAULT_PASSWORD,
                    DEFAULT_PASSWORD,
                    common::USER_IDENTITY,
                )
                .await?;

            register.verify_register_failed().await?;
            register.verify_error_message("邮箱被使用").await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn registration_with_existing_phone_fails() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("registration_with_existing_phone_fails")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_register().await?;

            let register = RegisterPage::new(&driver);
            register.verify_loaded().await?;
            register
                .register(
                    &data::unique_username(),
                    &data::unique_email(),
                    &config.existing.phone,
                    DEFAULT_PASSWORD,
                    DEFAULT_PASSWORD,
                    common::USER_IDENTITY,
                )
                .await?;

            register.verify_register_failed().await?;
            register.verify_error_message("手机号被使用").await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn registration_with_short_password_fails() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("registration_with_short_password_fails")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_register().await?;

            let register = RegisterPage::new(&driver);
            register.verify_loaded().await?;
            register
                .register(
                    &data::unique_username(),
                    &data::unique_email(),
                    &data::unique_phone(),
                    "123",
                    "123",
                    common::USER_IDENTITY,
                )
                .await?;

            register.verify_register_failed().await?;
            register.verify_error_message("密码错误").await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn user_login_succeeds() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("user_login_succeeds")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::login_as_user(&driver, &config).await?;
            HomePage::new(&driver).verify_logged_in(&config.user.username).await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn login_with_unknown_account_fails() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("login_with_unknown_account_fails")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_login().await?;

            let login = LoginPage::new(&driver);
            login.verify_loaded().await?;
            login
                .login_with_password("nonexistent@example.com", DEFAULT_PASSWORD, common::USER_IDENTITY)
                .await?;

            login.verify_login_failed().await?;
            login.verify_error_message("用户信息为空").await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn login_with_wrong_password_fails() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("login_with_wrong_password_fails")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            HomePage::new(&driver).open_login().await?;

            let login = LoginPage::new(&driver);
            login.verify_loaded().await?;
            login
                .login_with_password(&config.user.email, "wrongpassword", common::USER_IDENTITY)
                .await?;

            login.verify_login_failed().await?;
            login.verify_error_message("密码错误").await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn logout_returns_to_anonymous_state() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("logout_returns_to_anonymous_state")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::login_as_user(&driver, &config).await?;

            let home = HomePage::new(&driver);
            home.verify_logged_in(&config.user.username).await?;
            home.open_user_menu().await?;
            home.logout().await?;
            home.verify_not_logged_in().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}
