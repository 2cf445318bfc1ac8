//! Data model for scraped apartment listings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain tag stamped on every scraped record
pub const SOURCE_DOMAIN: &str = "t-dsk.ru";

/// Developer tag stamped on every scraped record
pub const DEVELOPER: &str = "ТДСК";

/// One apartment listing as extracted from a search-result tile.
///
/// The fragile numeric fields (`entrance_number`, `floor`, `area`,
/// `room_count`, `flat_number`) are uniformly optional: `None` means the
/// source markup carried no value. The field order is the column order of
/// the listings CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    /// Process-generated identifier, assigned at extraction time
    pub id: Uuid,
    /// Site-assigned listing identifier; empty when the tile has no id attribute
    pub advert_id: String,
    pub domain: String,
    pub developer: String,
    pub address: String,
    /// Construction-phase code (`ГП-...`) found in the address
    pub gp: String,
    pub description: String,
    pub entrance_number: Option<u32>,
    pub floor: Option<i32>,
    /// Square meterage; the source writes a comma decimal separator
    pub area: Option<f64>,
    pub room_count: Option<u32>,
    pub flat_number: Option<u32>,
    /// Price in rubles
    pub price: i64,
    pub published_at: DateTime<Utc>,
    pub actualized_at: DateTime<Utc>,
}
