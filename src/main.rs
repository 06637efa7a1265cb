use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use recruit_scraper::config::Config;
use recruit_scraper::fetcher::Fetcher;
use recruit_scraper::infra::ReqwestHttp;
use recruit_scraper::logging;
use recruit_scraper::pipeline::{write_failures, Pipeline};

#[derive(Parser)]
#[command(name = "recruit_scraper")]
#[command(about = "Scrapes 247Sports recruiting rankings and player profiles into a JSON report")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report output path, overriding the config
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write failed players to this JSON file
    #[arg(long)]
    failures_output: Option<PathBuf>,

    /// Class years to scrape (comma-separated), e.g. 2026,2027
    #[arg(long, value_delimiter = ',')]
    years: Option<Vec<i32>>,

    /// Scrape only the first N rows of each rankings page
    #[arg(long)]
    limit: Option<usize>,

    /// Delay between requests in milliseconds, overriding the config
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Directory for rotated JSON log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_dir);

    let mut config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(),
    }
    .context("Failed to load configuration")?;

    if let Some(years) = &cli.years {
        config.retain_years(years);
        if config.rankings.is_empty() {
            warn!("No configured rankings match years {:?}", years);
        }
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.scraper.request_delay_ms = delay_ms;
    }
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.path));

    let http = ReqwestHttp::new(&config.scraper).context("Failed to build HTTP client")?;
    let fetcher = Fetcher::new(http, &config.scraper);
    let pipeline = Pipeline::new(fetcher, &config)?.with_limit(cli.limit);

    let result = match pipeline.run(&output_path).await {
        Ok(result) => result,
        Err(e) => {
            error!("Scrape aborted: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &cli.failures_output {
        let written = write_failures(path, &result.failures)?;
        info!("Failures saved to {} ({} players)", written, result.failures.len());
    }

    let elapsed = result.finished_at - result.started_at;
    info!(
        "Finished in {}s: {} scraped, {} failed",
        elapsed.num_seconds(),
        result.players.len(),
        result.failures.len()
    );
    Ok(())
}
