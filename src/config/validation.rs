use crate::config::types::{Config, OutputConfig, ReportConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_report_config(&config.report)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.site_filter.is_empty() {
        return Err(ConfigError::Validation(
            "site-filter cannot be empty".to_string(),
        ));
    }

    if config.max_request_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-request-retries must be >= 1, got {}",
            config.max_request_retries
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.exposure_path.is_empty() {
        return Err(ConfigError::Validation(
            "exposure-path cannot be empty".to_string(),
        ));
    }

    if config.start_date > config.end_date {
        return Err(ConfigError::Validation(format!(
            "start-date {} is after end-date {}",
            config.start_date, config.end_date
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.listings_path.is_empty() {
        return Err(ConfigError::Validation(
            "listings-path cannot be empty".to_string(),
        ));
    }

    if config.active_by_day_path.is_empty() {
        return Err(ConfigError::Validation(
            "active-by-day-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_config() -> Config {
        Config {
            scraper: ScraperConfig {
                base_url: "https://www.t-dsk.ru/buildings/search-apartments/".to_string(),
                site_filter: "all".to_string(),
                max_request_retries: 5,
                request_timeout_secs: 30,
            },
            report: ReportConfig {
                exposure_path: "data/exposure.csv".to_string(),
                start_date: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            },
            output: OutputConfig {
                listings_path: "output/new_tdsk_apartments.csv".to_string(),
                active_by_day_path: "output/active_objects_by_day.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = valid_config();
        config.scraper.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));

        config.scraper.base_url = "ftp://t-dsk.ru/".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_rejects_zero_retries() {
        let mut config = valid_config();
        config.scraper.max_request_retries = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        let mut config = valid_config();
        config.scraper.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.scraper.request_timeout_secs = 301;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_inverted_date_range() {
        let mut config = valid_config();
        config.report.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_paths() {
        let mut config = valid_config();
        config.output.listings_path = String::new();
        assert!(validate(&config).is_err());
    }
}
