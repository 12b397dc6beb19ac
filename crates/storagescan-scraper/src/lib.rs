pub mod address;
pub mod client;
pub(crate) mod dom;
pub mod discovery;
pub mod error;
pub mod normalize;
pub(crate) mod parse;
pub mod site;
pub mod template;

pub use address::{clean_address, parse_address, AddressComponents, AddressParseError};
pub use client::AutomatitClient;
pub use discovery::{is_automatit_html, rent_page_links};
pub use error::ScraperError;
pub use normalize::{normalize_rent, parse_monthly_rent, parse_unit_dimensions};
pub use site::{extract_facility, PageFailure, SiteReport, SiteScraper, SiteStatus};
pub use template::{select_template, FacilityMatch, LatLng, RawUnit, Template, TEMPLATES};
