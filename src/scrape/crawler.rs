//! Crawl controller - the paginated fetch loop
//!
//! This module drives the page-by-page crawl:
//! - Fetching one page at a time, fully sequentially
//! - Extracting every tile with per-item failure isolation
//! - Reading the load-more control as the sole continuation signal
//! - Retrying a failed fetch against a budget that resets on every success

use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::ScraperConfig;
use crate::model::Apartment;
use crate::scrape::extractor::{selector, ItemExtractor};
use crate::scrape::fetcher::{build_http_client, fetch_listing_page};
use crate::ScrapeError;

/// Main crawl controller
pub struct Crawler {
    config: ScraperConfig,
    client: Client,
    extractor: ItemExtractor,
    tiles: Selector,
    load_more: Selector,
}

/// Everything a single page contributes to the crawl
struct PageOutcome {
    apartments: Vec<Apartment>,
    has_more: bool,
}

impl Crawler {
    /// Creates a new crawler instance
    ///
    /// Builds the HTTP client and compiles every selector and pattern the
    /// crawl will need, so the loop itself cannot fail on static inputs.
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config).map_err(ScrapeError::Client)?;

        Ok(Self {
            client,
            extractor: ItemExtractor::new()?,
            tiles: selector(".col-lg-3.col-md-4.col-sm-6.col-xs-12.flex-item")?,
            load_more: selector(".search-result__more.load_more")?,
            config,
        })
    }

    /// Runs the paginated crawl to completion
    ///
    /// The loop keeps one cursor: the current page number, the continuation
    /// signal from the last fetched page, and the remaining retry budget.
    /// A failed fetch retries the same page number; the budget resets after
    /// every successful fetch and its exhaustion aborts the whole crawl.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Apartment>)` - Records from all pages, in crawl order
    /// * `Err(ScrapeError)` - Retry budget exhausted on some page
    pub async fn run(&self) -> Result<Vec<Apartment>, ScrapeError> {
        let mut all_apartments = Vec::new();
        let mut page: u32 = 1;
        let mut has_more = true;
        let mut retries_remaining = self.config.max_request_retries;

        while has_more {
            match fetch_listing_page(&self.client, &self.config, page).await {
                Ok(body) => {
                    let outcome = self.process_page(&body);
                    tracing::debug!(
                        "Page {}: {} listings extracted",
                        page,
                        outcome.apartments.len()
                    );

                    all_apartments.extend(outcome.apartments);
                    has_more = outcome.has_more;
                    page += 1;
                    retries_remaining = self.config.max_request_retries;
                }
                Err(e) => {
                    retries_remaining -= 1;
                    if retries_remaining == 0 {
                        return Err(ScrapeError::RetriesExhausted {
                            page,
                            attempts: self.config.max_request_retries,
                            source: Box::new(e),
                        });
                    }
                    tracing::warn!(
                        "Fetch failed for page {} ({} retries left): {}",
                        page,
                        retries_remaining,
                        e
                    );
                }
            }
        }

        tracing::info!(
            "Crawl complete: {} listings across {} pages",
            all_apartments.len(),
            page - 1
        );

        Ok(all_apartments)
    }

    /// Extracts all tiles of one page and reads the continuation signal
    ///
    /// A tile that fails extraction is logged and skipped; the rest of the
    /// page is unaffected.
    fn process_page(&self, body: &str) -> PageOutcome {
        let document = Html::parse_document(body);

        let mut apartments = Vec::new();
        for tile in document.select(&self.tiles) {
            match self.extractor.extract(tile) {
                Ok(apartment) => apartments.push(apartment),
                Err(e) => tracing::warn!("Skipping listing: {}", e),
            }
        }

        // The load-more control is the only continuation signal; the site
        // exposes no total page or item count.
        let has_more = document.select(&self.load_more).next().is_some();

        PageOutcome {
            apartments,
            has_more,
        }
    }
}
