use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_rankings")]
    pub rankings: Vec<RankingSource>,
}

/// Request identity, throttling and retry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
    pub dnt: String,
    pub request_delay_ms: u64,
    pub retry_extra_delay_ms: u64,
    pub max_attempts: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankingSource {
    pub year: i32,
    pub url: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: constants::BASE_URL.to_string(),
            user_agent: constants::USER_AGENT.to_string(),
            accept: constants::ACCEPT.to_string(),
            accept_language: constants::ACCEPT_LANGUAGE.to_string(),
            referer: constants::REFERER.to_string(),
            dnt: constants::DNT.to_string(),
            request_delay_ms: constants::REQUEST_DELAY_MS,
            retry_extra_delay_ms: constants::RETRY_EXTRA_DELAY_MS,
            max_attempts: constants::MAX_ATTEMPTS,
            timeout_seconds: constants::TIMEOUT_SECONDS,
        }
    }
}

impl ScraperConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Wait after a failed attempt: the normal delay plus the extra backoff.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms + self.retry_extra_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: constants::DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

fn default_rankings() -> Vec<RankingSource> {
    constants::DEFAULT_RANKINGS
        .iter()
        .map(|(year, url)| RankingSource {
            year: *year,
            url: url.to_string(),
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            output: OutputConfig::default(),
            rankings: default_rankings(),
        }
    }
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config.toml` from the working directory if present, else the built-in defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new(constants::DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scraper.max_attempts == 0 {
            return Err(ScraperError::Config(
                "scraper.max_attempts must be at least 1".into(),
            ));
        }
        url::Url::parse(&self.scraper.base_url).map_err(|e| {
            ScraperError::Config(format!(
                "scraper.base_url '{}' is not a valid URL: {}",
                self.scraper.base_url, e
            ))
        })?;
        Ok(())
    }

    /// Restricts the rankings to the given years, keeping configured order.
    pub fn retain_years(&mut self, years: &[i32]) {
        self.rankings.retain(|source| years.contains(&source.year));
    }
}
