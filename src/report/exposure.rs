//! Exposure table ingestion
//!
//! The exposure table arrives as CSV with ISO 8601 text dates. The date
//! columns are coerced into UTC timestamps during deserialization, so no
//! downstream logic ever sees a text date. The `area` column accepts the
//! source's comma decimal separator.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::ReportError;

/// One row of the exposure table; unknown columns are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ExposureRecord {
    pub address: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub actualized_at: DateTime<Utc>,
    pub room_count: Option<u32>,
    #[serde(default, deserialize_with = "de_localized_float")]
    pub area: Option<f64>,
    pub price: Option<i64>,
}

/// Loads the exposure table from a CSV file with a header row
pub fn load_exposure(path: &Path) -> Result<Vec<ExposureRecord>, ReportError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ExposureRecord = row.map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }

    tracing::debug!("Loaded {} exposure records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses an exposure timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare date; naive values
/// are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ReportError> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
    }

    Err(ReportError::InvalidTimestamp(raw.to_string()))
}

fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn de_localized_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .replace(',', ".")
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(ReportError::InvalidNumber(text.to_string()))),
    }
}
