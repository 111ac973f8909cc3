//! Configuration for the monitor

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port the status page listens on
    pub port: u16,

    /// Base URL of the WebDriver endpoint (e.g. a local chromedriver)
    pub webdriver_url: String,

    /// Path to the newline-delimited site list
    pub site_list_path: PathBuf,

    /// Path to the append-only check journal
    pub log_path: PathBuf,

    /// Path to the persisted first-start timestamp
    pub boot_time_path: PathBuf,

    /// Delay between the end of one check cycle and the start of the next
    pub check_interval: Duration,

    /// Post-navigation wait before a check is considered complete
    pub settle_duration: Duration,

    /// HTTP timeout for individual driver commands
    pub driver_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            webdriver_url: "http://localhost:9515".to_string(),
            site_list_path: PathBuf::from("weblist.txt"),
            log_path: PathBuf::from("logs.txt"),
            boot_time_path: PathBuf::from("boot_time.txt"),
            check_interval: Duration::from_secs(5 * 60),
            settle_duration: Duration::from_millis(3000),
            driver_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(webdriver_url) = env::var("WEBDRIVER_URL") {
            config.webdriver_url = webdriver_url;
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.webdriver_url.is_empty() {
            return Err("webdriver_url cannot be empty".to_string());
        }

        if self.check_interval.is_zero() {
            return Err("check_interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 3000);
        assert_eq!(config.check_interval, Duration::from_secs(300));
        assert_eq!(config.settle_duration, Duration::from_millis(3000));
    }

    #[test]
    fn test_empty_webdriver_url_rejected() {
        let config = Config {
            webdriver_url: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
