//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set LOTTERY_E2E_CHROMIUM")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page session error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Element could not be located
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// Wait expired before the condition held
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout budget in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waited_for: String,
    },

    /// JavaScript evaluation error
    #[error("Script evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Page-level assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// HTTP API error
    #[error("API request failed: {message}")]
    Api {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl SuiteError {
    /// Build an assertion failure with an expected/actual pair.
    pub fn assertion(what: &str, expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        Self::AssertionFailed {
            message: format!("{what}: expected {expected}, got {actual}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_message_carries_both_sides() {
        let err = SuiteError::assertion("element text mismatch", "'a'", "'b'");
        let text = err.to_string();
        assert!(text.contains("element text mismatch"));
        assert!(text.contains("'a'"));
        assert!(text.contains("'b'"));
    }

    #[test]
    fn test_timeout_display() {
        let err = SuiteError::Timeout {
            ms: 5000,
            waited_for: "login dialog".to_string(),
        };
        assert_eq!(err.to_string(), "Timed out after 5000ms waiting for login dialog");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SuiteError::from(io);
        assert!(matches!(err, SuiteError::Io(_)));
    }
}
