//! Value types produced by the site templates.

use scraper::ElementRef;

/// Address normalizer handed to every matcher.
pub type AddressCleaner = fn(&str) -> String;

/// Identity fields read by a template matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityMatch {
    /// Cleaned single-line address; empty when not found.
    pub address: String,
    /// Phone as displayed on the page; empty when not found.
    pub phone: String,
}

impl FacilityMatch {
    /// A template matches only when both fields were found.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.address.is_empty() && !self.phone.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One unit row as it appears on the page, before numeric parsing.
#[derive(Debug, Clone)]
pub struct RawUnit<'a> {
    /// Size label, e.g. `"10x15"`.
    pub size: String,
    pub unit_type: String,
    pub amenities: Vec<String>,
    /// Rent as displayed, e.g. `"$125.00"`.
    pub rent: String,
    pub special_offer: Option<String>,
    pub reserve_link: Option<String>,
    pub hold_link: Option<String>,
    /// Units left, for layouts that show a counter.
    pub units_left: Option<i64>,
    /// The originating row, kept for row-scoped availability checks.
    pub element: ElementRef<'a>,
}
