//! Scraping module for the apartment search pipeline
//!
//! This module contains the crawler/parser core, including:
//! - HTTP client construction and per-page fetching
//! - Listing tile extraction with per-item failure isolation
//! - The paginated crawl loop with its retry budget

mod crawler;
mod extractor;
mod fetcher;

pub use crawler::Crawler;
pub use extractor::ItemExtractor;
pub use fetcher::{build_http_client, fetch_listing_page, DESKTOP_USER_AGENT};

use crate::config::ScraperConfig;
use crate::model::Apartment;
use crate::ScrapeResult;

/// Scrapes every apartment currently listed on the source site
///
/// This is the main entry point for a crawl. It walks the paginated search
/// results until the load-more control disappears and returns the extracted
/// records in crawl order.
pub async fn scrape_apartments(config: &ScraperConfig) -> ScrapeResult<Vec<Apartment>> {
    let crawler = Crawler::new(config.clone())?;
    crawler.run().await
}
