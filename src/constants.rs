/// Site and request defaults used when no config file overrides them.

pub const BASE_URL: &str = "https://247sports.com";

// Recruiting classes scraped by default, in run order
pub const DEFAULT_RANKINGS: &[(i32, &str)] = &[
    (
        2026,
        "https://247sports.com/season/2026-football/recruitrankings/?InstitutionGroup=HighSchool",
    ),
    (
        2027,
        "https://247sports.com/season/2027-football/recruitrankings/?InstitutionGroup=HighSchool",
    ),
    (
        2028,
        "https://247sports.com/season/2028-football/recruitrankings/?InstitutionGroup=HighSchool",
    ),
];

pub const DEFAULT_OUTPUT_PATH: &str = "247sports_players_clean.json";

// Browser-like header set; the site blocks obvious bots
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REFERER: &str = "https://247sports.com/";
pub const DNT: &str = "1";

pub const REQUEST_DELAY_MS: u64 = 2_000;
pub const RETRY_EXTRA_DELAY_MS: u64 = 1_000;
pub const MAX_ATTEMPTS: u32 = 3;
pub const TIMEOUT_SECONDS: u64 = 15;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
