//! Scenario harness.
//!
//! Wraps a live test body so every scenario gets the same treatment:
//! timing, tracing, and a failure screenshot before the error propagates.

use crate::driver::Driver;
use crate::result::SuiteResult;
use crate::screenshot::ScreenshotDir;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether the scenario passed
    pub passed: bool,
    /// Error message when it failed
    pub error: Option<String>,
    /// Wall-clock duration
    pub duration: Duration,
}

impl ScenarioResult {
    /// Convert back into a result for `?` propagation in tests.
    pub fn into_result(self) -> SuiteResult<()> {
        match self.error {
            None => Ok(()),
            Some(message) => Err(crate::result::SuiteError::AssertionFailed { message }),
        }
    }
}

/// Aggregate of several scenario results
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Individual results
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    /// Record a result
    pub fn push(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    /// Whether every scenario passed
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Number of passing scenarios
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of failing scenarios
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Total scenario count
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// The failing results
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// A named scenario, optionally wired to a screenshot directory
#[derive(Debug)]
pub struct Scenario<'a> {
    name: String,
    shots: Option<&'a ScreenshotDir>,
}

impl<'a> Scenario<'a> {
    /// Create a scenario
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shots: None,
        }
    }

    /// Capture a screenshot into `dir` when the body fails
    pub fn with_screenshots(mut self, dir: &'a ScreenshotDir) -> Self {
        self.shots = Some(dir);
        self
    }

    /// Run the scenario body.
    ///
    /// The body borrows the same driver, so a failure screenshot can be
    /// taken from the page state the error left behind.
    pub async fn run<Fut>(&self, driver: &dyn Driver, body: Fut) -> ScenarioResult
    where
        Fut: Future<Output = SuiteResult<()>>,
    {
        info!(scenario = %self.name, "scenario start");
        let start = Instant::now();
        let outcome = body.await;
        let duration = start.elapsed();

        match outcome {
            Ok(()) => {
                info!(scenario = %self.name, ?duration, "scenario passed");
                ScenarioResult {
                    name: self.name.clone(),
                    passed: true,
                    error: None,
                    duration,
                }
            }
            Err(e) => {
                error!(scenario = %self.name, error = %e, "scenario failed");
                if let Some(shots) = self.shots {
                    if let Err(shot_err) = shots.capture_failure(driver, &self.name).await {
                        error!(error = %shot_err, "failure screenshot could not be captured");
                    }
                }
                ScenarioResult {
                    name: self.name.clone(),
                    passed: false,
                    error: Some(e.to_string()),
                    duration,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::result::SuiteError;

    #[tokio::test]
    async fn test_passing_scenario() {
        let driver = MockDriver::new();
        let result = Scenario::new("ok").run(&driver, async { Ok(()) }).await;
        assert!(result.passed);
        assert!(result.error.is_none());
        assert!(result.into_result().is_ok());
    }

    #[tokio::test]
    async fn test_failing_scenario_carries_message() {
        let driver = MockDriver::new();
        let result = Scenario::new("bad")
            .run(&driver, async {
                Err(SuiteError::AssertionFailed {
                    message: "wrong title".to_string(),
                })
            })
            .await;
        assert!(!result.passed);
        assert!(result.error.as_deref().unwrap().contains("wrong title"));
        assert!(result.into_result().is_err());
    }

    #[tokio::test]
    async fn test_failure_screenshot_taken() {
        let dir = tempfile::tempdir().unwrap();
        let shots = ScreenshotDir::new(dir.path()).unwrap();
        let driver = MockDriver::new();
        driver.set_screenshot(vec![1, 2, 3]);

        let _ = Scenario::new("draw_flow")
            .with_screenshots(&shots)
            .run(&driver, async {
                Err(SuiteError::AssertionFailed {
                    message: "no result".to_string(),
                })
            })
            .await;

        let captured: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].starts_with("draw_flow_FAILED_"));
    }

    #[test]
    fn test_run_summary_counts() {
        let mut summary = RunSummary::default();
        summary.push(ScenarioResult {
            name: "a".to_string(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        });
        summary.push(ScenarioResult {
            name: "b".to_string(),
            passed: false,
            error: Some("boom".to_string()),
            duration: Duration::ZERO,
        });
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.passed_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!(!summary.all_passed());
        assert_eq!(summary.failures()[0].name, "b");
    }
}
