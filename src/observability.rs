//! Metrics for the fetch and pipeline phases.
//!
//! Recorded through the `metrics` facade; with no recorder installed these are no-ops.

/// Metrics for profile and rankings page requests
pub struct FetchMetrics;

impl FetchMetrics {
    pub fn record_attempt() {
        ::metrics::counter!("recruit_fetch_attempts_total").increment(1);
    }

    pub fn record_success(duration_secs: f64, body_bytes: usize) {
        ::metrics::histogram!("recruit_fetch_duration_seconds").record(duration_secs);
        ::metrics::histogram!("recruit_fetch_body_bytes").record(body_bytes as f64);
    }

    pub fn record_error() {
        ::metrics::counter!("recruit_fetch_errors_total").increment(1);
    }
}

/// Metrics for the per-year scrape loop
pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_player_scraped(year: i32) {
        ::metrics::counter!("recruit_players_scraped_total", "year" => year.to_string()).increment(1);
    }

    pub fn record_player_failed(year: i32) {
        ::metrics::counter!("recruit_player_failures_total", "year" => year.to_string()).increment(1);
    }

    pub fn record_rankings_size(year: i32, players: usize) {
        ::metrics::histogram!("recruit_rankings_players", "year" => year.to_string())
            .record(players as f64);
    }

    pub fn record_run_duration(duration_secs: f64) {
        ::metrics::histogram!("recruit_pipeline_duration_seconds").record(duration_secs);
    }
}
