//! Report module for the exposure table
//!
//! This module handles:
//! - Loading the exposure table and coercing its date columns
//! - Aggregating per-day active-object counts by address corpus
//! - Writing the aggregate as CSV

mod active_objects;
mod exposure;

pub use active_objects::{active_objects_by_day, write_active_objects_csv, ActiveCount};
pub use exposure::{load_exposure, parse_timestamp, ExposureRecord};
