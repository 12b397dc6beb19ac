//! Template 2: `.facility_info` block with `.unit_row` rows and a page-wide
//! availability signal.

use scraper::{ElementRef, Html};

use super::{lat_lng_from_attrs, AddressCleaner, FacilityMatch, LatLng, RawUnit, Template};
use crate::dom::{attr_of, first_match, non_empty, selector, text_of, texts_of};

pub(super) const TEMPLATE: Template = Template {
    id: 2,
    match_facility,
    extract_units,
    extract_lat_lng,
    is_available,
    page_special_offer: Some(page_special_offer),
};

fn match_facility(page: &Html, clean: AddressCleaner) -> FacilityMatch {
    let root = page.root_element();
    let parts = texts_of(root, ".facility_info .address span");

    FacilityMatch {
        address: clean(&parts.join(" ")),
        phone: text_of(root, ".facility_info .phone a"),
    }
}

fn extract_units(page: &Html) -> Vec<RawUnit<'_>> {
    page.root_element()
        .select(&selector(".unit_row"))
        .map(|row| RawUnit {
            size: text_of(row, ".unit_size"),
            unit_type: text_of(row, ".unit_details .type"),
            // Both spellings occur in the wild for the feature list.
            amenities: texts_of(row, ".unit_details li:not(.type), .unit-details li:not(.type)"),
            rent: text_of(row, ".monthly_rent .now"),
            special_offer: None,
            reserve_link: attr_of(row, "data-link"),
            hold_link: None,
            units_left: None,
            element: row,
        })
        .collect()
}

fn extract_lat_lng(page: &Html) -> Option<LatLng> {
    lat_lng_from_attrs(
        first_match(page.root_element(), "#loc_map"),
        "data-lat",
        "data-lng",
    )
}

/// Page-level: every unit on the page is considered available when any row
/// offers a "Continue" reservation button and no waitlist button.
fn is_available(page: &Html, _row: ElementRef<'_>) -> bool {
    let waitlist = selector(".rate_button .waitlist");
    page.root_element()
        .select(&selector(".unit_row"))
        .any(|row| {
            let has_continue = text_of(row, ".rate_button .reserve_btn")
                .to_lowercase()
                .contains("continue");
            let has_waitlist = row.select(&waitlist).next().is_some();
            has_continue && !has_waitlist
        })
}

fn page_special_offer(page: &Html) -> Option<String> {
    non_empty(text_of(page.root_element(), ".special_offers"))
}
