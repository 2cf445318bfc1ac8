use chrono::NaiveDate;
use serde::Deserialize;

/// Main configuration structure for TDSK-Radar
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub report: ReportConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Search endpoint of the source site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the `objects` query parameter (site/complex selection)
    #[serde(rename = "site-filter", default = "default_site_filter")]
    pub site_filter: String,

    /// Retry budget for a single page fetch
    #[serde(rename = "max-request-retries", default = "default_max_retries")]
    pub max_request_retries: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Exposure report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Path to the exposure table (CSV with a header row)
    #[serde(rename = "exposure-path")]
    pub exposure_path: String,

    /// First day of the report range (inclusive)
    #[serde(rename = "start-date")]
    pub start_date: NaiveDate,

    /// Last day of the report range (inclusive)
    #[serde(rename = "end-date")]
    pub end_date: NaiveDate,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the scraped listings CSV
    #[serde(rename = "listings-path")]
    pub listings_path: String,

    /// Path of the active-objects-by-day CSV
    #[serde(rename = "active-by-day-path")]
    pub active_by_day_path: String,
}

fn default_site_filter() -> String {
    "all".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}
