//! Conversion from template [`RawUnit`]s to [`storagescan_core::NormalizedRent`].
//!
//! Every template hands over text exactly as displayed. Numeric parsing is
//! uniform across templates and lives here so that a malformed cell only
//! blanks the affected field.

use chrono::{DateTime, Utc};
use storagescan_core::NormalizedRent;

use crate::dom::non_empty;
use crate::parse::{parse_leading_float, parse_leading_int};
use crate::template::RawUnit;

/// Parses a displayed rent such as `"$1,200.00"` into `1200.0`.
///
/// Currency symbols and thousands separators are stripped before reading the
/// leading number. Returns `None` for text like `"Call"`.
#[must_use]
pub fn parse_monthly_rent(text: &str) -> Option<f64> {
    let stripped: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    parse_leading_float(&stripped)
}

/// Splits a size label like `"10x15"` into `(length, width)` in feet.
///
/// Each side is parsed independently; a side without a leading
/// non-negative integer becomes `None`.
#[must_use]
pub fn parse_unit_dimensions(size: &str) -> (Option<u32>, Option<u32>) {
    let mut sides = size.split('x');
    let length = sides.next().and_then(parse_feet);
    let width = sides.next().and_then(parse_feet);
    (length, width)
}

fn parse_feet(side: &str) -> Option<u32> {
    parse_leading_int(side).and_then(|n| u32::try_from(n).ok())
}

/// Builds the normalized rent record for one unit row.
///
/// `page_offer` is the layout's page-wide promotion, used only when the row
/// has no offer of its own.
#[must_use]
pub fn normalize_rent(
    unit: &RawUnit<'_>,
    is_available: bool,
    page_offer: Option<&str>,
    source: &str,
    scraped_at: DateTime<Utc>,
) -> NormalizedRent {
    let (length, width) = parse_unit_dimensions(&unit.size);
    let special_offer = unit
        .special_offer
        .clone()
        .or_else(|| page_offer.map(str::to_string));

    NormalizedRent {
        date: scraped_at,
        monthly_rent_online: parse_monthly_rent(&unit.rent),
        monthly_rent_in_person: None,
        unit_description_short: unit.size.clone(),
        unit_description_long: non_empty(unit.unit_type.clone()),
        unit_dimensions_length_in_feet: length,
        unit_dimensions_width_in_feet: width,
        is_available,
        discounts: Vec::new(),
        unit_amenities: unit.amenities.clone(),
        source: source.to_string(),
        limited_availability: None,
        limited_availability_text: None,
        limited_availability_units_left: unit.units_left.and_then(|n| u32::try_from(n).ok()),
        special_offer,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
