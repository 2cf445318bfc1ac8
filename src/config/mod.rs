//! Configuration module for TDSK-Radar
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use tdsk_radar::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Retry budget: {}", config.scraper.max_request_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ReportConfig, ScraperConfig};

// Re-export parser functions
pub use parser::load_config;
