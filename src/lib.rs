//! TDSK-Radar: apartment market snapshot tooling
//!
//! This crate scrapes the paginated apartment search of t-dsk.ru into a flat
//! listings file and derives an active-objects-by-day report from an exposure
//! table.

pub mod config;
pub mod model;
pub mod output;
pub mod report;
pub mod scrape;

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for TDSK-Radar operations
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the crawl pipeline
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error for page {page}: {source}")]
    Http { page: u32, source: reqwest::Error },

    #[error("HTTP status {status} for page {page}")]
    Status { page: u32, status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Retry budget exhausted after {attempts} attempts on page {page}: {source}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("Invalid selector {css:?}: {message}")]
    Selector { css: &'static str, message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Per-item extraction errors; these fail one listing, never the crawl
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("price node missing")]
    PriceMissing,

    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors raised while building reports from the exposure table
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to read exposure file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid numeric value {0:?}")]
    InvalidNumber(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for TDSK-Radar operations
pub type Result<T> = std::result::Result<T, RadarError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for crawl operations
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::Config;
pub use model::Apartment;
pub use scrape::Crawler;
