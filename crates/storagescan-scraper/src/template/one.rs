//! Template 1: `#facility-info .contact` block with `.unit-row` rate rows.

use scraper::{ElementRef, Html};

use super::{
    has_unavailable_marker, lat_lng_from_attrs, AddressCleaner, FacilityMatch, LatLng, RawUnit,
    Template,
};
use crate::dom::{
    attrs_of, collapse_whitespace, element_text, first_match, has_class, non_empty,
    own_text_nodes, selector, text_of, texts_of,
};

pub(super) const TEMPLATE: Template = Template {
    id: 1,
    match_facility,
    extract_units,
    extract_lat_lng,
    is_available,
    page_special_offer: Some(page_special_offer),
};

fn match_facility(page: &Html, clean: AddressCleaner) -> FacilityMatch {
    let root = page.root_element();

    // The street lines are bare text nodes inside `.contact`; the phone sits
    // in its own child element and is read separately.
    let lines: Vec<&str> = root
        .select(&selector("#facility-info .contact"))
        .flat_map(own_text_nodes)
        .collect();
    let joined = collapse_whitespace(&lines.join(" ")).replace(", ", ",");

    FacilityMatch {
        address: clean(&joined),
        phone: text_of(root, "#facility-info .contact .phone"),
    }
}

fn extract_units(page: &Html) -> Vec<RawUnit<'_>> {
    page.root_element()
        .select(&selector(".unit-row"))
        .map(|row| {
            let size_text = text_of(row, ".unit-size");
            let size = size_text.lines().next().unwrap_or_default().trim().to_string();
            let buttons = attrs_of(row, ".rate-button .btn_reserve", "href");

            RawUnit {
                size,
                unit_type: text_of(row, ".p-unit-type"),
                amenities: texts_of(row, ".unit-details li"),
                rent: text_of(row, ".monthly-rent"),
                special_offer: None,
                reserve_link: buttons.first().cloned(),
                hold_link: if buttons.len() > 1 {
                    buttons.last().cloned()
                } else {
                    None
                },
                units_left: None,
                element: row,
            }
        })
        .collect()
}

fn extract_lat_lng(page: &Html) -> Option<LatLng> {
    lat_lng_from_attrs(
        first_match(page.root_element(), ".map_tab.data_source"),
        "data-lat",
        "data-lng",
    )
}

/// Available when the row is flagged `available-unit` and carries no
/// sold-out / waitlist wording.
fn is_available(_page: &Html, row: ElementRef<'_>) -> bool {
    has_class(row, "available-unit") && !has_unavailable_marker(&element_text(row))
}

fn page_special_offer(page: &Html) -> Option<String> {
    non_empty(text_of(page.root_element(), ".special-offer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::clean_address;

    const PAGE: &str = r#"
        <html><head><title>Belton Self Storage</title></head><body>
          <div class="special-offer"> First month $1 </div>
          <div id="facility-info">
            <div class="contact">
              123 Main St Belton,
              TX 76513
              <span class="phone">(254) 555-0100</span>
              Monday - Friday 9am - 5pm
            </div>
            <div class="map_tab data_source" data-lat="31.0561" data-lng="-97.4642"></div>
          </div>
          <div class="unit-row available-unit">
            <div class="unit-size">10x15
              <small>Medium</small></div>
            <div class="p-unit-type">Climate Controlled</div>
            <div class="monthly-rent">$125.00</div>
            <ul class="unit-details"><li>Drive-Up</li><li>Ground Floor</li></ul>
            <div class="rate-button">
              <a class="btn_reserve" href="/reserve/1">Reserve</a>
              <a class="btn_reserve" href="/hold/1">Hold</a>
            </div>
          </div>
          <div class="unit-row">
            <div class="unit-size">5x5</div>
            <div class="monthly-rent">Call</div>
            <div class="rate-button"><a class="btn_reserve" href="/reserve/2">Reserve</a></div>
          </div>
        </body></html>
    "#;

    #[test]
    fn matches_contact_block() {
        let page = Html::parse_document(PAGE);
        let found = match_facility(&page, clean_address);
        assert_eq!(found.address, "123 Main St Belton,TX 76513");
        assert_eq!(found.phone, "(254) 555-0100");
    }

    #[test]
    fn rejects_page_without_phone() {
        let page = Html::parse_document(
            r#"<div id="facility-info"><div class="contact">123 Main St, Belton, TX 76513</div></div>"#,
        );
        assert!(!match_facility(&page, clean_address).is_match());
    }

    #[test]
    fn rejects_page_without_address() {
        let page = Html::parse_document(
            r#"<div id="facility-info"><div class="contact"><span class="phone">(254) 555-0100</span></div></div>"#,
        );
        assert!(!match_facility(&page, clean_address).is_match());
    }

    #[test]
    fn extracts_unit_rows() {
        let page = Html::parse_document(PAGE);
        let units = extract_units(&page);
        assert_eq!(units.len(), 2);

        let first = &units[0];
        assert_eq!(first.size, "10x15");
        assert_eq!(first.unit_type, "Climate Controlled");
        assert_eq!(first.rent, "$125.00");
        assert_eq!(first.amenities, vec!["Drive-Up", "Ground Floor"]);
        assert_eq!(first.reserve_link.as_deref(), Some("/reserve/1"));
        assert_eq!(first.hold_link.as_deref(), Some("/hold/1"));
        assert!(first.special_offer.is_none());

        let second = &units[1];
        assert_eq!(second.size, "5x5");
        assert_eq!(second.reserve_link.as_deref(), Some("/reserve/2"));
        assert!(second.hold_link.is_none());
        assert!(second.amenities.is_empty());
    }

    #[test]
    fn availability_requires_flag_class() {
        let page = Html::parse_document(PAGE);
        let units = extract_units(&page);
        assert!(is_available(&page, units[0].element));
        assert!(!is_available(&page, units[1].element));
    }

    #[test]
    fn availability_rejects_sold_out_text() {
        let page = Html::parse_document(
            r#"<div class="unit-row available-unit"><div class="unit-size">10x10</div><span>SOLD OUT</span></div>"#,
        );
        let units = extract_units(&page);
        assert!(!is_available(&page, units[0].element));
    }

    #[test]
    fn reads_map_tab_coordinates() {
        let page = Html::parse_document(PAGE);
        assert_eq!(
            extract_lat_lng(&page),
            Some(LatLng {
                lat: 31.0561,
                lng: -97.4642
            })
        );
    }

    #[test]
    fn reads_page_special_offer() {
        let page = Html::parse_document(PAGE);
        assert_eq!(page_special_offer(&page).as_deref(), Some("First month $1"));
    }
}
