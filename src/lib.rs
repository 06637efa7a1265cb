pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod infra;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod scrapers;
pub mod types;
