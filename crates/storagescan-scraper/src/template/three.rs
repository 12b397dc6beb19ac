//! Template 3: mobile facility header with `.facility_rates_row` rows.

use scraper::{ElementRef, Html};

use super::{lat_lng_from_attrs, unit_count, AddressCleaner, FacilityMatch, LatLng, RawUnit, Template};
use crate::dom::{attrs_of, first_match, has_match, non_empty, own_text_of, selector, text_of, texts_of};

pub(super) const TEMPLATE: Template = Template {
    id: 3,
    match_facility,
    extract_units,
    extract_lat_lng,
    is_available,
    page_special_offer: None,
};

const UNITS_LEFT: &str = ".facility_rates_size span#uta";

fn match_facility(page: &Html, clean: AddressCleaner) -> FacilityMatch {
    let root = page.root_element();
    let parts = texts_of(root, "#facility_info_mobile_wrap .unit_info_address a");

    FacilityMatch {
        address: clean(&parts.join(" ")),
        phone: text_of(root, "#facility_info_mobile_wrap .unit_info_phone a"),
    }
}

fn extract_units(page: &Html) -> Vec<RawUnit<'_>> {
    page.root_element()
        .select(&selector(".facility_rates_row"))
        .map(|row| {
            let special = text_of(row, ".facility_rates_special")
                .replace("Special:", "")
                .trim()
                .to_string();
            let buttons = attrs_of(row, ".facility_rates_get_unit a.btn_hover", "href");

            RawUnit {
                size: own_text_of(row, ".facility_rates_size"),
                unit_type: text_of(row, ".facility_rates_details b"),
                amenities: texts_of(row, ".facility_rates_details ul li"),
                rent: text_of(row, ".facility_rates_rent .facility_rates_wrap"),
                special_offer: non_empty(special),
                reserve_link: buttons.first().cloned(),
                hold_link: if buttons.len() > 1 {
                    buttons.last().cloned()
                } else {
                    None
                },
                units_left: unit_count(row, UNITS_LEFT),
                element: row,
            }
        })
        .collect()
}

fn extract_lat_lng(page: &Html) -> Option<LatLng> {
    lat_lng_from_attrs(first_match(page.root_element(), "#map"), "data-lat", "data-lng")
}

/// Available when the row offers no waitlist button and its counter is
/// positive. A row without a counter is unavailable.
fn is_available(_page: &Html, row: ElementRef<'_>) -> bool {
    let waitlisted = has_match(row, ".facility_rates_get_unit .btn_wait_list");
    let left = unit_count(row, UNITS_LEFT).unwrap_or(0);
    !waitlisted && left > 0
}
