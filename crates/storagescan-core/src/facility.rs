use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A self-storage facility scraped from one rent page, normalized so that
/// every site template produces the same record shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFacility {
    /// Page `<title>` text.
    pub name: String,
    /// Street line, e.g. `"123 Main St"`. `None` when the address could not be parsed.
    pub address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    /// Two-letter state or province abbreviation.
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// The rent page URL this record was scraped from.
    pub website: String,
    pub phone: String,
    /// Which site template (1-4) matched the page.
    pub template: u8,
    pub rents: Vec<NormalizedRent>,
}

impl NormalizedFacility {
    /// Returns the number of units currently rentable.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.rents.iter().filter(|r| r.is_available).count()
    }

    /// Lowest online monthly rent among available units.
    #[must_use]
    pub fn lowest_available_rent(&self) -> Option<f64> {
        self.rents
            .iter()
            .filter(|r| r.is_available)
            .filter_map(|r| r.monthly_rent_online)
            .min_by(f64::total_cmp)
    }
}

/// One unit listing on a facility's rent page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRent {
    /// When the page was scraped.
    pub date: DateTime<Utc>,
    /// Parsed from the rent cell, e.g. `"$125.00"` → `125.0`.
    pub monthly_rent_online: Option<f64>,
    pub monthly_rent_in_person: Option<f64>,
    /// Raw size text, e.g. `"10x15"`.
    pub unit_description_short: String,
    /// Unit type text from the template (e.g. `"Climate Controlled"`).
    pub unit_description_long: Option<String>,
    pub unit_dimensions_length_in_feet: Option<u32>,
    pub unit_dimensions_width_in_feet: Option<u32>,
    pub is_available: bool,
    pub discounts: Vec<String>,
    pub unit_amenities: Vec<String>,
    /// Rent page URL.
    pub source: String,
    pub limited_availability: Option<bool>,
    pub limited_availability_text: Option<String>,
    pub limited_availability_units_left: Option<u32>,
    pub special_offer: Option<String>,
}
