//! Template 4: `hgroup` title block with a `tr.unit_row` rate table.

use scraper::{ElementRef, Html};

use super::{lat_lng_from_attrs, unit_count, AddressCleaner, FacilityMatch, LatLng, RawUnit, Template};
use crate::dom::{first_match, has_match, non_empty, own_text_of, selector, text_of, texts_of};

pub(super) const TEMPLATE: Template = Template {
    id: 4,
    match_facility,
    extract_units,
    extract_lat_lng,
    is_available,
    page_special_offer: None,
};

const UNITS_LEFT: &str = ".unit-size span#uta";

fn match_facility(page: &Html, clean: AddressCleaner) -> FacilityMatch {
    let root = page.root_element();
    let street = text_of(root, "#facility_info .title hgroup h2");
    let locality = text_of(root, "#facility_info .title hgroup h3");
    let joined = [street, locality]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    FacilityMatch {
        address: clean(&joined),
        phone: text_of(root, "#facility_info .phone a"),
    }
}

fn extract_units(page: &Html) -> Vec<RawUnit<'_>> {
    page.root_element()
        .select(&selector("tr.unit_row"))
        .map(|row| {
            let details = texts_of(row, ".unit-details ul li");
            let reserve = first_match(row, ".rate-button a.btn_reserve")
                .and_then(|a| a.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string);

            RawUnit {
                size: own_text_of(row, ".unit-size"),
                unit_type: details.join(", "),
                amenities: details,
                rent: text_of(row, ".monthly-rent .now"),
                special_offer: non_empty(text_of(row, ".special-offer")),
                reserve_link: reserve,
                hold_link: None,
                units_left: unit_count(row, UNITS_LEFT),
                element: row,
            }
        })
        .collect()
}

fn extract_lat_lng(page: &Html) -> Option<LatLng> {
    lat_lng_from_attrs(first_match(page.root_element(), ".location_item"), "lat", "lng")
}

fn is_available(_page: &Html, row: ElementRef<'_>) -> bool {
    let waitlisted = has_match(row, ".rate-button .btn_wait_list");
    let left = unit_count(row, UNITS_LEFT).unwrap_or(0);
    !waitlisted && left > 0
}
