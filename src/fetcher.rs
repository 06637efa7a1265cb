use scraper::Html;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::app::ports::HttpClientPort;
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::observability::FetchMetrics;

/// Throttled, retrying page fetcher. Every call sleeps: `request_delay` after a
/// success, `request_delay + retry_extra_delay` after each failed attempt.
pub struct Fetcher<C: HttpClientPort> {
    client: C,
    max_attempts: u32,
    request_delay: Duration,
    retry_delay: Duration,
}

impl<C: HttpClientPort> Fetcher<C> {
    pub fn new(client: C, config: &ScraperConfig) -> Self {
        Self {
            client,
            max_attempts: config.max_attempts.max(1),
            request_delay: config.request_delay(),
            retry_delay: config.retry_delay(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetches `url` and parses the body into a document.
    pub async fn fetch(&self, url: &str) -> Result<Html> {
        let body = self.fetch_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    /// Fetches `url` and returns the raw body of the first successful response.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            info!("Fetching {} (attempt {}/{})", url, attempt, self.max_attempts);
            FetchMetrics::record_attempt();
            let started = Instant::now();

            let outcome = match self.client.get(url).await {
                Ok(resp) if resp.is_success() => Ok(resp.body),
                Ok(resp) => Err(format!("HTTP status {} for {}", resp.status, url)),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(body) => {
                    FetchMetrics::record_success(started.elapsed().as_secs_f64(), body.len());
                    debug!("Fetched {} bytes from {}", body.len(), url);
                    sleep(self.request_delay).await;
                    return Ok(body);
                }
                Err(message) => {
                    FetchMetrics::record_error();
                    error!("HTTP error for {}: {}", url, message);
                    last_error = message;
                    sleep(self.retry_delay).await;
                }
            }
        }

        Err(ScraperError::Fetch {
            url: url.to_string(),
            attempts: self.max_attempts,
            message: last_error,
        })
    }
}

async fn sleep(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
