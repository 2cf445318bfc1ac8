//! Listing tile extraction
//!
//! This module turns one search-result tile into an [`Apartment`] record.
//! Every rule defaults to `None`/empty when its node, attribute, or pattern
//! is absent; the price is the one exception and fails the whole item. A
//! value that is present but unparsable also fails the item.

use chrono::Utc;
use regex::Regex;
use scraper::{ElementRef, Selector};
use uuid::Uuid;

use crate::model::{Apartment, DEVELOPER, SOURCE_DOMAIN};
use crate::{ExtractError, ScrapeError};

/// Prefix the site's search component prepends to every tile id attribute
const ADVERT_ID_PREFIX: &str = "bx_3218110189_";

/// Compiles a CSS selector, mapping the parse error into [`ScrapeError`]
pub(super) fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css,
        message: e.to_string(),
    })
}

/// Extracts [`Apartment`] records from search-result tiles.
///
/// Selectors and text patterns are compiled once at construction and reused
/// for every tile of the crawl.
pub struct ItemExtractor {
    flat_link: Selector,
    area: Selector,
    floor: Selector,
    address: Selector,
    price_base: Selector,
    price_season: Selector,
    area_re: Regex,
    gp_re: Regex,
    entrance_re: Regex,
}

impl ItemExtractor {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            flat_link: selector(".search-result__item-flat")?,
            area: selector(".search-result__item-area")?,
            floor: selector(".search-result__item-floor")?,
            address: selector(".search-result__address")?,
            price_base: selector(".search-result__price-base span")?,
            price_season: selector(".sale-price-season-search")?,
            area_re: Regex::new(r"\d+,\d+")?,
            gp_re: Regex::new(r"ГП-[^\s,)]+")?,
            entrance_re: Regex::new(r"(\d+) подъезд")?,
        })
    }

    /// Extracts one tile into an [`Apartment`], or fails the item
    pub fn extract(&self, tile: ElementRef<'_>) -> Result<Apartment, ExtractError> {
        let flat_link = tile.select(&self.flat_link).next();

        let advert_id = tile
            .value()
            .attr("id")
            .map(|id| id.strip_prefix(ADVERT_ID_PREFIX).unwrap_or(id).to_string())
            .unwrap_or_default();

        let area = match tile.select(&self.area).next() {
            Some(element) => {
                let text = element.text().collect::<String>();
                match self.area_re.find(&text) {
                    Some(found) => Some(parse_localized_area(found.as_str())?),
                    None => None,
                }
            }
            None => None,
        };

        let room_count = flat_link
            .and_then(|link| link.value().attr("data-rooms"))
            .map(|raw| parse_number("data-rooms", raw))
            .transpose()?;

        let flat_number = flat_link
            .and_then(|link| link.value().attr("data-number"))
            .map(|raw| parse_number("data-number", raw))
            .transpose()?;

        let floor = tile
            .select(&self.floor)
            .next()
            .map(|element| {
                let text = element.text().collect::<String>();
                parse_number("floor", text.trim())
            })
            .transpose()?;

        let address = tile
            .select(&self.address)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let gp = self
            .gp_re
            .find(&address)
            .map(|found| found.as_str().to_string())
            .unwrap_or_default();

        let entrance_number = self
            .entrance_re
            .captures(&address)
            .map(|captures| parse_number("entrance", &captures[1]))
            .transpose()?;

        let price = self.extract_price(tile)?;

        let now = Utc::now();

        Ok(Apartment {
            id: Uuid::new_v4(),
            advert_id,
            domain: SOURCE_DOMAIN.to_string(),
            developer: DEVELOPER.to_string(),
            description: address.clone(),
            address,
            gp,
            entrance_number,
            floor,
            area,
            room_count,
            flat_number,
            price,
            published_at: now,
            actualized_at: now,
        })
    }

    /// Reads the price, falling back to the seasonal promo node.
    ///
    /// The primary node text is stripped of spaces; if what remains is not
    /// purely numeric (a promo banner, a currency-decorated string), the
    /// leading text of the seasonal node carries the actual price. Neither
    /// node present is a fatal extraction error for the item.
    fn extract_price(&self, tile: ElementRef<'_>) -> Result<i64, ExtractError> {
        if let Some(element) = tile.select(&self.price_base).next() {
            let digits = strip_whitespace(&element.text().collect::<String>());
            if is_numeric(&digits) {
                return parse_number("price", &digits);
            }
        }

        let seasonal = tile
            .select(&self.price_season)
            .next()
            .and_then(|element| element.text().next())
            .ok_or(ExtractError::PriceMissing)?;

        let digits = strip_whitespace(seasonal.trim());
        parse_number("price", &digits)
    }
}

/// Parses a numeric string, naming the offending field on failure
fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<T, ExtractError> {
    raw.trim().parse().map_err(|_| ExtractError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parses a `digits,digits` area value, comma as decimal separator
fn parse_localized_area(raw: &str) -> Result<f64, ExtractError> {
    raw.replace(',', ".")
        .parse()
        .map_err(|_| ExtractError::InvalidNumber {
            field: "area",
            value: raw.to_string(),
        })
}

fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_numeric(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const FULL_TILE: &str = r##"
        <div class="col-lg-3 col-md-4 col-sm-6 col-xs-12 flex-item" id="bx_3218110189_48213">
            <a class="search-result__item-flat" href="#" data-rooms="2" data-number="47">
                <div class="search-result__item-area">45,5 кв.м</div>
                <div class="search-result__item-floor">7</div>
            </a>
            <div class="search-result__address"> ул. Ленина 5 (ГП-2.1), 3 подъезд </div>
            <div class="search-result__price-base"><span>5 100 000</span></div>
        </div>"##;

    fn extract(html: &str) -> Result<Apartment, ExtractError> {
        let extractor = ItemExtractor::new().unwrap();
        let fragment = Html::parse_fragment(html);
        let tile_selector = Selector::parse(".flex-item").unwrap();
        let tile = fragment.select(&tile_selector).next().expect("tile present");
        extractor.extract(tile)
    }

    #[test]
    fn test_full_tile() {
        let apartment = extract(FULL_TILE).unwrap();

        assert_eq!(apartment.advert_id, "48213");
        assert_eq!(apartment.domain, "t-dsk.ru");
        assert_eq!(apartment.developer, "ТДСК");
        assert_eq!(apartment.address, "ул. Ленина 5 (ГП-2.1), 3 подъезд");
        assert_eq!(apartment.description, apartment.address);
        assert_eq!(apartment.gp, "ГП-2.1");
        assert_eq!(apartment.entrance_number, Some(3));
        assert_eq!(apartment.floor, Some(7));
        assert_eq!(apartment.area, Some(45.5));
        assert_eq!(apartment.room_count, Some(2));
        assert_eq!(apartment.flat_number, Some(47));
        assert_eq!(apartment.price, 5_100_000);
        assert_eq!(apartment.published_at, apartment.actualized_at);
    }

    #[test]
    fn test_entrance_number_ignores_earlier_digits() {
        // The house number must not bleed into the entrance match
        let apartment = extract(&FULL_TILE.replace(
            "ул. Ленина 5 (ГП-2.1), 3 подъезд",
            "ул. Ленина 5, 3 подъезд",
        ))
        .unwrap();
        assert_eq!(apartment.entrance_number, Some(3));
        assert_eq!(apartment.gp, "");
    }

    #[test]
    fn test_address_without_markers() {
        let apartment =
            extract(&FULL_TILE.replace("ул. Ленина 5 (ГП-2.1), 3 подъезд", "мкр. Северный"))
                .unwrap();
        assert_eq!(apartment.gp, "");
        assert_eq!(apartment.entrance_number, None);
    }

    #[test]
    fn test_area_without_decimal_is_none() {
        let apartment = extract(&FULL_TILE.replace("45,5 кв.м", "кв.м")).unwrap();
        assert_eq!(apartment.area, None);
    }

    #[test]
    fn test_missing_flat_link_defaults() {
        let html = r#"
            <div class="flex-item" id="bx_3218110189_9">
                <div class="search-result__address">ГП-7, 1 подъезд</div>
                <div class="search-result__price-base"><span>4 200 000</span></div>
            </div>"#;
        let apartment = extract(html).unwrap();

        assert_eq!(apartment.advert_id, "9");
        assert_eq!(apartment.room_count, None);
        assert_eq!(apartment.flat_number, None);
        assert_eq!(apartment.floor, None);
        assert_eq!(apartment.area, None);
        assert_eq!(apartment.price, 4_200_000);
    }

    #[test]
    fn test_missing_id_attribute() {
        let html = r#"
            <div class="flex-item">
                <div class="search-result__price-base"><span>4 200 000</span></div>
            </div>"#;
        let apartment = extract(html).unwrap();
        assert_eq!(apartment.advert_id, "");
        assert_eq!(apartment.address, "");
    }

    #[test]
    fn test_seasonal_price_fallback() {
        let html = r#"
            <div class="flex-item" id="bx_3218110189_77">
                <div class="search-result__price-base"><span>Акция!</span></div>
                <div class="sale-price-season-search"> 4 900 000 <span>по акции</span></div>
            </div>"#;
        let apartment = extract(html).unwrap();
        assert_eq!(apartment.price, 4_900_000);
    }

    #[test]
    fn test_missing_price_fails_item() {
        let html = r#"
            <div class="flex-item" id="bx_3218110189_5">
                <div class="search-result__address">ГП-1, 2 подъезд</div>
            </div>"#;
        assert!(matches!(
            extract(html).unwrap_err(),
            ExtractError::PriceMissing
        ));
    }

    #[test]
    fn test_garbage_floor_fails_item() {
        let result = extract(&FULL_TILE.replace(
            r#"<div class="search-result__item-floor">7</div>"#,
            r#"<div class="search-result__item-floor">этаж</div>"#,
        ));
        assert!(matches!(
            result.unwrap_err(),
            ExtractError::InvalidNumber { field: "floor", .. }
        ));
    }
}
