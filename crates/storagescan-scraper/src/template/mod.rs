//! Site template registry and dispatch.
//!
//! Automatit has shipped several page layouts over the years. Each layout
//! is modelled as a [`Template`]: a bundle of plain functions that know that
//! layout's selectors. [`select_template`] tries them in priority order
//! (1 → 4) and returns the first whose matcher finds both an address and a
//! phone number.

mod four;
mod one;
mod three;
mod two;
mod types;

use scraper::{ElementRef, Html};

pub use types::{AddressCleaner, FacilityMatch, LatLng, RawUnit};

use crate::address::clean_address;
use crate::dom::{attr_of, text_of};
use crate::parse::{parse_leading_float, parse_leading_int};

/// One page layout's extraction strategy.
#[derive(Debug)]
pub struct Template {
    /// Priority position, 1-based. Lower ids are tried first.
    pub id: u8,
    /// Reads the facility address and phone. Either may be empty.
    pub match_facility: fn(&Html, AddressCleaner) -> FacilityMatch,
    /// Reads every unit row on the page.
    pub extract_units: fn(&Html) -> Vec<RawUnit<'_>>,
    pub extract_lat_lng: fn(&Html) -> Option<LatLng>,
    /// Decides whether a unit can be rented now. Row-scoped layouts inspect
    /// the given row; page-level layouts ignore it.
    pub is_available: fn(&Html, ElementRef<'_>) -> bool,
    /// Page-wide promotion text, for layouts whose rows carry no offer of
    /// their own.
    pub page_special_offer: Option<fn(&Html) -> Option<String>>,
}

/// All known templates in priority order.
pub static TEMPLATES: [Template; 4] = [one::TEMPLATE, two::TEMPLATE, three::TEMPLATE, four::TEMPLATE];

/// Returns the first template whose matcher yields a non-empty address and
/// phone, together with that match. `None` means the page follows none of
/// the known layouts.
#[must_use]
pub fn select_template(page: &Html) -> Option<(&'static Template, FacilityMatch)> {
    TEMPLATES.iter().find_map(|template| {
        let found = (template.match_facility)(page, clean_address);
        if found.is_match() {
            tracing::debug!(
                template = template.id,
                address = %found.address,
                "matched site template"
            );
            Some((template, found))
        } else {
            tracing::trace!(template = template.id, "template did not match");
            None
        }
    })
}

/// Text fragments that mark a unit row as not rentable.
const UNAVAILABLE_MARKERS: [&str; 4] = ["sold out", "waitlist", "unavailable", "call for availability"];

/// Case-insensitive check for any [`UNAVAILABLE_MARKERS`] fragment.
pub(crate) fn has_unavailable_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    UNAVAILABLE_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Reads a coordinate pair from two attributes of `el`.
///
/// `None` when the element is absent or either value is not a finite number.
pub(crate) fn lat_lng_from_attrs(
    el: Option<ElementRef<'_>>,
    lat_attr: &str,
    lng_attr: &str,
) -> Option<LatLng> {
    let el = el?;
    let lat = parse_leading_float(&attr_of(el, lat_attr)?)?;
    let lng = parse_leading_float(&attr_of(el, lng_attr)?)?;
    Some(LatLng { lat, lng })
}

/// Remaining-unit counter shown inside a row's size cell.
pub(crate) fn unit_count(row: ElementRef<'_>, css: &str) -> Option<i64> {
    parse_leading_int(&text_of(row, css))
}
