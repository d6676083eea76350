//! Suite configuration.
//!
//! All fixture data lives in a flat YAML file (`test-config.yaml`):
//! base URL, browser settings, credentials, records known to exist in the
//! target deployment (for duplicate-registration cases), and sample
//! prize/activity data for the admin flows. A few environment variables
//! override the file for CI.

use crate::browser::BrowserSettings;
use crate::result::{SuiteError, SuiteResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "LOTTERY_E2E_CONFIG";
/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "LOTTERY_E2E_BASE_URL";
/// Environment variable overriding headless mode ("0"/"false" disables)
pub const HEADLESS_ENV: &str = "LOTTERY_E2E_HEADLESS";
/// Environment variable overriding the Chromium binary path
pub const CHROMIUM_ENV: &str = "LOTTERY_E2E_CHROMIUM";

/// A login identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Display name shown in the navigation bar after login
    pub username: String,
    /// Password
    pub password: String,
    /// Email (the usual login account)
    pub email: String,
    /// Phone number, when the identity has one
    #[serde(default)]
    pub phone: Option<String>,
}

/// Records that already exist in the target deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingRecords {
    /// An email already registered
    pub email: String,
    /// A phone number already registered
    pub phone: String,
    /// A username already registered
    pub username: String,
}

/// Sample prize data for the admin form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSample {
    /// Prize name
    pub name: String,
    /// Prize description
    pub description: String,
    /// Prize price, as typed into the form
    pub price: String,
}

/// Sample activity data for the admin form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySample {
    /// Activity name
    pub name: String,
    /// Activity description
    pub description: String,
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

/// Complete suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the deployed lottery application
    pub base_url: String,
    /// Browser launch settings
    #[serde(default)]
    pub browser: BrowserSettings,
    /// Regular user identity
    pub user: Credentials,
    /// Administrator identity
    pub admin: Credentials,
    /// Records known to exist (duplicate-registration cases)
    pub existing: ExistingRecords,
    /// Sample prize for the add-prize flow
    pub prize: PrizeSample,
    /// Sample activity for the create-activity flow
    pub activity: ActivitySample,
    /// Directory for failure/success screenshots
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
}

impl SuiteConfig {
    /// Load the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| SuiteError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: Self = serde_yaml_ng::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from the default location, applying
    /// environment overrides.
    ///
    /// The file is `test-config.yaml` next to the crate manifest unless
    /// `LOTTERY_E2E_CONFIG` points elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or malformed.
    pub fn from_env() -> SuiteResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).map_or_else(
            |_| Path::new(env!("CARGO_MANIFEST_DIR")).join("test-config.yaml"),
            PathBuf::from,
        );
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `LOTTERY_E2E_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Ok(headless) = std::env::var(HEADLESS_ENV) {
            self.browser.headless = !matches!(headless.as_str(), "0" | "false" | "no");
        }
        if let Ok(path) = std::env::var(CHROMIUM_ENV) {
            self.browser.chromium_path = Some(path);
        }
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn validate(&self) -> SuiteResult<()> {
        if self.base_url.is_empty() {
            return Err(SuiteError::Config {
                message: "base_url must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("user.email", &self.user.email),
            ("user.password", &self.user.password),
            ("admin.email", &self.admin.email),
            ("admin.password", &self.admin.password),
            ("existing.email", &self.existing.email),
            ("existing.phone", &self.existing.phone),
        ] {
            if value.is_empty() {
                return Err(SuiteError::Config {
                    message: format!("{field} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
