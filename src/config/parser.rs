use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scraper]
base-url = "https://www.t-dsk.ru/buildings/search-apartments/"
site-filter = "all"
max-request-retries = 5
request-timeout-secs = 30

[report]
exposure-path = "data/exposure.csv"
start-date = "2023-07-01"
end-date = "2023-12-31"

[output]
listings-path = "output/new_tdsk_apartments.csv"
active-by-day-path = "output/active_objects_by_day.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.scraper.base_url,
            "https://www.t-dsk.ru/buildings/search-apartments/"
        );
        assert_eq!(config.scraper.max_request_retries, 5);
        assert_eq!(config.report.start_date.to_string(), "2023-07-01");
        assert_eq!(config.output.listings_path, "output/new_tdsk_apartments.csv");
    }

    #[test]
    fn test_defaults_apply_when_omitted() {
        let config_content = r#"
[scraper]
base-url = "https://www.t-dsk.ru/buildings/search-apartments/"

[report]
exposure-path = "data/exposure.csv"
start-date = "2023-07-01"
end-date = "2023-12-31"

[output]
listings-path = "output/new_tdsk_apartments.csv"
active-by-day-path = "output/active_objects_by_day.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scraper.site_filter, "all");
        assert_eq!(config.scraper.max_request_retries, 5);
        assert_eq!(config.scraper.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        // end-date precedes start-date
        let config_content = r#"
[scraper]
base-url = "https://www.t-dsk.ru/buildings/search-apartments/"

[report]
exposure-path = "data/exposure.csv"
start-date = "2023-12-31"
end-date = "2023-07-01"

[output]
listings-path = "output/new_tdsk_apartments.csv"
active-by-day-path = "output/active_objects_by_day.csv"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
