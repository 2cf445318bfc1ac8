//! HTTP fetcher implementation
//!
//! This module handles the network side of the crawl:
//! - Building the HTTP client with a desktop browser user agent
//! - Issuing one GET per page of search results
//! - Classifying transport errors and non-success statuses as retryable
//!   fetch failures

use crate::config::ScraperConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Fixed desktop-browser user agent; the site serves full markup to it
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Pagination query parameter of the site's search component
pub const PAGE_PARAM: &str = "PAGEN_3";

/// Site-selection query parameter
pub const SITE_FILTER_PARAM: &str = "objects";

/// Builds the HTTP client used for the whole crawl
///
/// The per-request timeout is bounded by configuration so a stalled server
/// cannot hang the crawl indefinitely.
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(DESKTOP_USER_AGENT)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page of search results
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Scraper configuration (base URL and site filter)
/// * `page` - 1-based page number
///
/// # Returns
///
/// * `Ok(String)` - Body of the results page
/// * `Err(ScrapeError)` - Transport error or non-success status; both are
///   retryable from the controller's point of view
pub async fn fetch_listing_page(
    client: &Client,
    config: &ScraperConfig,
    page: u32,
) -> Result<String, ScrapeError> {
    let page_number = page.to_string();

    let response = client
        .get(&config.base_url)
        .query(&[
            (SITE_FILTER_PARAM, config.site_filter.as_str()),
            (PAGE_PARAM, page_number.as_str()),
        ])
        .send()
        .await
        .map_err(|source| ScrapeError::Http { page, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            page,
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| ScrapeError::Http { page, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> ScraperConfig {
        ScraperConfig {
            base_url: "https://www.t-dsk.ru/buildings/search-apartments/".to_string(),
            site_filter: "all".to_string(),
            max_request_retries: 5,
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }
}
