//! Display scenarios: page rendering and load-time sweeps.
//!
//! Ignored by default; run with `cargo test -- --ignored` against a
//! reachable deployment.

mod common;

use lottery_e2e::pages::{
    ActivityManagementPage, HomePage, LotteryPage, PrizeManagementPage, UserPrizeRecordPage,
};
use lottery_e2e::Scenario;

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn home_load_and_navigation() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("home_load_and_navigation")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            let home = HomePage::new(&driver);
            home.verify_navigation().await?;
            home.verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn prize_management_display() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("prize_management_display")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::login_as_admin(&driver, &config).await?;

            let prizes = PrizeManagementPage::new(&driver);
            prizes.verify_loaded().await?;
            prizes.verify_list_displayed().await?;
            prizes.verify_information_completeness().await?;
            prizes.verify_pagination().await?;
            prizes.verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn lottery_page_display() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("lottery_page_display")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::login_as_user(&driver, &config).await?;
            let home = HomePage::new(&driver);
            home.open_activities().await?;
            home.open_activity_draw(2).await?;

            let lottery = LotteryPage::new(&driver);
            lottery.verify_loaded().await?;
            lottery.verify_grid_displayed().await?;
            lottery.verify_activity_info().await?;
            lottery.verify_prizes_info().await?;
            lottery.verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn my_prize_records_display() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("my_prize_records_display")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::login_as_user(&driver, &config).await?;
            let home = HomePage::new(&driver);
            home.open_user_menu().await?;
            home.open_my_prizes().await?;

            let records = UserPrizeRecordPage::new(&driver);
            records.verify_loaded().await?;
            records.verify_records_displayed().await?;
            records.verify_record_completeness().await?;
            records.verify_summary().await?;
            records.verify_pagination().await?;
            records.verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}

#[tokio::test]
#[ignore = "requires the deployed lottery app and a local Chromium"]
async fn page_load_performance_sweep() {
    let config = common::config();
    let (browser, driver) = common::launch(&config).await;
    let shots = common::screenshots(&config);

    let result = Scenario::new("page_load_performance_sweep")
        .with_screenshots(&shots)
        .run(&driver, async {
            common::open_home(&driver, &config).await?;
            let home = HomePage::new(&driver);
            home.verify_load_performance().await?;

            home.open_login().await?;
            let login = lottery_e2e::pages::LoginPage::new(&driver);
            login.verify_loaded().await?;
            login
                .login_with_password(
                    &config.admin.email,
                    &config.admin.password,
                    common::ADMIN_IDENTITY,
                )
                .await?;
            if !login.login_succeeded().await? {
                return Err(lottery_e2e::SuiteError::AssertionFailed {
                    message: "admin login did not produce a success toast".to_string(),
                });
            }

            home.open_admin().await?;
            PrizeManagementPage::new(&driver).verify_load_performance().await?;

            home.open_activity_admin().await?;
            ActivityManagementPage::new(&driver).verify_load_performance().await?;

            home.open_activities().await?;
            home.open_activity_draw(2).await?;
            LotteryPage::new(&driver).verify_load_performance().await
        })
        .await;

    let _ = browser.close().await;
    result.into_result().unwrap();
}
