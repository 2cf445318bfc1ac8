//! Active-objects-by-day aggregation
//!
//! For every day of the configured range this module counts the exposure
//! records active on that day (published on or before it, actualized on or
//! after it), grouped by the address corpus, and writes the result as CSV.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Serialize;

use crate::report::exposure::ExposureRecord;
use crate::ReportError;

/// One row of `active_objects_by_day.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveCount {
    pub day: NaiveDate,
    pub address_corpus: String,
    pub active_count: u64,
}

/// Aggregates per-day active counts over an inclusive day range
///
/// A record is active on a day iff it was published on or before the day's
/// UTC midnight and actualized on or after it. Records whose address has no
/// corpus marker never join a group. Output is ordered by day, then corpus.
pub fn active_objects_by_day(
    records: &[ExposureRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ActiveCount>, ReportError> {
    let pattern = Regex::new(r"([\w .,()-]*), подъезд")?;

    // Resolve each record's corpus once, not per day
    let corpora: Vec<Option<String>> = records
        .iter()
        .map(|record| address_corpus(&record.address, &pattern))
        .collect();

    let mut rows = Vec::new();
    let mut day = start;
    while day <= end {
        let midnight = day_start(day);

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for (record, corpus) in records.iter().zip(&corpora) {
            let corpus = match corpus {
                Some(corpus) => corpus,
                None => continue,
            };
            if record.published_at <= midnight && record.actualized_at >= midnight {
                *counts.entry(corpus.as_str()).or_insert(0) += 1;
            }
        }

        for (corpus, active_count) in counts {
            rows.push(ActiveCount {
                day,
                address_corpus: corpus.to_string(),
                active_count,
            });
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(rows)
}

/// Writes the aggregate as `day,address_corpus,active_count` rows
pub fn write_active_objects_csv(path: &Path, rows: &[ActiveCount]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Everything before the `, подъезд` marker, trimmed; `None` without a marker
fn address_corpus(address: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(address)
        .map(|captures| captures[1].trim().to_string())
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
