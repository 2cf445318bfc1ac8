//! Listings serialization
//!
//! One row per apartment record, header row, no index column. Column order
//! follows the field order of [`Apartment`]. Optional numerics serialize as
//! empty cells and deserialize back to `None`.

use std::path::Path;

use crate::model::Apartment;
use crate::Result;

/// Writes the aggregated records to a CSV file, creating parent directories
pub fn write_apartments_csv(path: &Path, apartments: &[Apartment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for apartment in apartments {
        writer.serialize(apartment)?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} listings to {}", apartments.len(), path.display());
    Ok(())
}

/// Reads a listings CSV back into records
pub fn read_apartments_csv(path: &Path) -> Result<Vec<Apartment>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut apartments = Vec::new();
    for row in reader.deserialize() {
        apartments.push(row?);
    }

    Ok(apartments)
}
