//! Sequential page checks against the shared browser session

use crate::driver::PageDriver;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Outcome of one URL check
///
/// Success means the driver raised no error across navigate, scroll and
/// settle. No page-load status is inspected; these are keep-warm visits,
/// not health checks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CheckStatus {
    Success,
    Failure(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckResult {
    pub url: String,
    pub status: CheckStatus,
}

impl CheckResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, CheckStatus::Success)
    }
}

/// Visit every URL in order, one result per URL
///
/// Strictly sequential: the single browser session cannot be shared, so
/// throughput is one URL per navigation plus settle. One URL's failure
/// never aborts the batch; the error message is captured and the next URL
/// proceeds.
pub async fn check_all(
    driver: &dyn PageDriver,
    urls: &[String],
    settle: Duration,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(urls.len());

    for url in urls {
        let status = match visit(driver, url, settle).await {
            Ok(()) => CheckStatus::Success,
            Err(e) => CheckStatus::Failure(e.to_string()),
        };
        debug!("Checked {}: {:?}", url, status);
        results.push(CheckResult {
            url: url.clone(),
            status,
        });
    }

    results
}

async fn visit(driver: &dyn PageDriver, url: &str, settle: Duration) -> crate::errors::Result<()> {
    driver.navigate(url).await?;
    driver.scroll_to_bottom().await?;
    driver.settle(settle).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{MonitorError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Driver that fails on a configured set of URLs and records call order
    struct FakeDriver {
        fail_on: Vec<String>,
        visited: Mutex<Vec<String>>,
    }

    impl FakeDriver {
        fn new(fail_on: &[&str]) -> Self {
            Self {
                fail_on: fail_on.iter().map(|s| s.to_string()).collect(),
                visited: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageDriver for FakeDriver {
        async fn navigate(&self, url: &str) -> Result<()> {
            self.visited.lock().unwrap().push(url.to_string());
            if self.fail_on.iter().any(|f| f == url) {
                return Err(MonitorError::Driver(format!("timeout loading {}", url)));
            }
            Ok(())
        }

        async fn scroll_to_bottom(&self) -> Result<()> {
            Ok(())
        }

        async fn settle(&self, _duration: Duration) -> Result<()> {
            Ok(())
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_all_success() {
        let driver = FakeDriver::new(&[]);
        let sites = urls(&["https://a.test", "https://b.test"]);

        let results = check_all(&driver, &sites, Duration::ZERO).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(CheckResult::is_success));
        assert_eq!(results[0].url, "https://a.test");
        assert_eq!(results[1].url, "https://b.test");
    }

    #[tokio::test]
    async fn test_one_failure_never_aborts_the_batch() {
        let driver = FakeDriver::new(&["https://b.test"]);
        let sites = urls(&["https://a.test", "https://b.test", "https://c.test"]);

        let results = check_all(&driver, &sites, Duration::ZERO).await;
        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(results[2].is_success());

        match &results[1].status {
            CheckStatus::Failure(msg) => {
                assert!(msg.contains("timeout loading https://b.test"));
            }
            other => panic!("expected failure, got {:?}", other),
        }

        // Every URL was attempted, in input order.
        let visited = driver.visited.lock().unwrap();
        assert_eq!(*visited, sites);
    }

    #[tokio::test]
    async fn test_empty_list_yields_no_results() {
        let driver = FakeDriver::new(&[]);
        let results = check_all(&driver, &[], Duration::ZERO).await;
        assert!(results.is_empty());
    }
}
