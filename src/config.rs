use std::{path::PathBuf, time::Duration};

use reqwest::Url;

use crate::{error::Result, retry::RetryConfig};

pub const DEFAULT_BASE_URL: &str = "https://www.blinkist.com/";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
pub const DEFAULT_CLOUDFLARE_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_CLOUDFLARE_WAIT_TIME: Duration = Duration::from_secs(2);

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site root, the API lives under `api/`.
    pub base_url: Url,
    /// Content language passed as the `locale` query parameter.
    pub locale: String,
    /// Root under which one directory per run is created.
    pub download_dir: PathBuf,
    /// Total number of attempts when a request is blocked by a challenge.
    pub cloudflare_max_attempts: u32,
    /// Fixed delay between challenge retries.
    pub cloudflare_wait_time: Duration,
}

impl Config {
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = base_url.parse()?;
        Ok(self)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.cloudflare_max_attempts,
            wait_time: self.cloudflare_wait_time,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default base url"),
            locale: DEFAULT_LOCALE.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            cloudflare_max_attempts: DEFAULT_CLOUDFLARE_MAX_ATTEMPTS,
            cloudflare_wait_time: DEFAULT_CLOUDFLARE_WAIT_TIME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.base_url.as_str(), "https://www.blinkist.com/");
        assert_eq!(config.locale, "en");
        assert_eq!(config.cloudflare_max_attempts, 3);
        assert_eq!(config.cloudflare_wait_time, Duration::from_secs(2));
    }

    #[test]
    fn base_url_override_rejects_garbage() {
        assert!(Config::default().with_base_url("not a url").is_err());
        let config = Config::default()
            .with_base_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
    }
}
