use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::app::ports::HttpClientPort;
use crate::config::{Config, RankingSource};
use crate::error::{Result, ScraperError};
use crate::fetcher::Fetcher;
use crate::observability::PipelineMetrics;
use crate::scrapers::sports247::{extract_player_bio, list_top_players, normalize};
use crate::types::{CleanedPlayer, FailureRecord, RankingEntry};

/// Everything a run produced, in scrape order.
#[derive(Debug, Default, Serialize)]
pub struct ScrapeOutcome {
    pub players: Vec<CleanedPlayer>,
    pub failures: Vec<FailureRecord>,
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub players: Vec<CleanedPlayer>,
    pub failures: Vec<FailureRecord>,
    pub output_file: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline<C: HttpClientPort> {
    fetcher: Fetcher<C>,
    base_url: Url,
    rankings: Vec<RankingSource>,
    limit: Option<usize>,
}

impl<C: HttpClientPort> Pipeline<C> {
    pub fn new(fetcher: Fetcher<C>, config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.scraper.base_url)?;
        Ok(Self {
            fetcher,
            base_url,
            rankings: config.rankings.clone(),
            limit: None,
        })
    }

    /// Only the first `limit` rows of each rankings page are scraped.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    /// Scrapes every configured year in order. A failing profile is recorded
    /// and skipped; a failing rankings page aborts the run.
    pub async fn scrape(&self) -> Result<ScrapeOutcome> {
        let mut outcome = ScrapeOutcome::default();

        for source in &self.rankings {
            let year = source.year;
            info!("Scraping rankings for class {}", year);
            let players = list_top_players(&self.fetcher, &source.url, &self.base_url, self.limit).await?;
            PipelineMetrics::record_rankings_size(year, players.len());

            let total = players.len();
            for (idx, entry) in players.iter().enumerate() {
                info!("[{}/{}] ({}) Scraping {}", idx + 1, total, year, entry.name);

                match self.scrape_player(entry, year).await {
                    Ok(player) => {
                        PipelineMetrics::record_player_scraped(year);
                        outcome.players.push(player);
                    }
                    Err(e) => {
                        PipelineMetrics::record_player_failed(year);
                        error!("Failed to scrape {} ({}): {}", entry.name, year, e);
                        outcome.failures.push(FailureRecord {
                            name: entry.name.clone(),
                            year,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        Ok(outcome)
    }

    #[instrument(skip(self, entry), fields(player = %entry.name))]
    async fn scrape_player(&self, entry: &RankingEntry, year: i32) -> Result<CleanedPlayer> {
        let raw = extract_player_bio(&self.fetcher, &entry.profile_url).await?;
        debug!("Extracted {} raw field(s)", raw.len());
        Ok(normalize(entry, &raw, year))
    }

    /// Scrapes, then writes the report to `output_path` and logs a summary.
    pub async fn run(&self, output_path: impl AsRef<Path>) -> Result<PipelineResult> {
        let started_at = Utc::now();
        let t_run = Instant::now();

        let outcome = self.scrape().await?;
        let output_file = write_report(output_path.as_ref(), &outcome.players)?;
        info!("Data saved to {} ({} players)", output_file, outcome.players.len());

        if !outcome.failures.is_empty() {
            error!("Failed on {} players", outcome.failures.len());
            for failure in &outcome.failures {
                error!("- ({}) {}: {}", failure.year, failure.name, failure.error);
            }
        }

        PipelineMetrics::record_run_duration(t_run.elapsed().as_secs_f64());
        Ok(PipelineResult {
            players: outcome.players,
            failures: outcome.failures,
            output_file,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Writes the players as pretty JSON, replacing any existing file.
pub fn write_report(path: &Path, players: &[CleanedPlayer]) -> Result<String> {
    write_json(path, players)
}

/// Writes the failure list alongside the report.
pub fn write_failures(path: &Path, failures: &[FailureRecord]) -> Result<String> {
    write_json(path, failures)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json_content = serde_json::to_string_pretty(value)?;
    fs::write(path, json_content).map_err(|e| {
        ScraperError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {}", path.display(), e),
        ))
    })?;
    Ok(path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Height;
    use tempfile::tempdir;

    #[test]
    fn test_write_report_preserves_unicode_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("players.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let players = vec![CleanedPlayer {
            name: "Dëmetrius Ñunez".to_string(),
            profile_url: "https://247sports.com/player/x/".to_string(),
            position: Some("S".to_string()),
            height: Some(Height { feet: 6, inches: 0 }),
            weight: None,
            city: None,
            high_school: None,
            class: Some(2027),
            composite_rating: None,
            site_rating: Some(91.0),
            class_year: 2027,
        }];
        write_report(&path, &players).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Dëmetrius Ñunez"));
        assert!(written.starts_with("[\n  {\n    \"name\""));
        let parsed: Vec<CleanedPlayer> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, players);
    }

    #[test]
    fn test_write_failures_round_trips_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("failures.json");
        let failures = vec![
            FailureRecord {
                name: "Tyran Stokes".to_string(),
                year: 2026,
                error: "Failed to fetch https://247sports.com/player/t/ after 3 attempt(s): HTTP status 503".to_string(),
            },
            FailureRecord {
                name: "Zed".to_string(),
                year: 2027,
                error: "HTTP status 404".to_string(),
            },
        ];

        let written = write_failures(&path, &failures).unwrap();
        assert_eq!(written, path.to_string_lossy());

        let parsed: Vec<FailureRecord> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, failures);
    }

    #[test]
    fn test_write_report_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/deeper/report.json");
        write_report(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
