//! Output module for scraped listings
//!
//! This module writes the aggregated apartment records as a flat CSV file
//! and reads them back for downstream comparison work.

mod listings;

pub use listings::{read_apartments_csv, write_apartments_csv};
