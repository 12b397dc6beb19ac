//! Facility address cleanup and component parsing.
//!
//! Contact blocks on Automatit sites mix the street address with emails,
//! office hours, and line breaks. [`clean_address`] strips that noise so
//! [`parse_address`] can split the remainder into street, city, state, and zip.

mod clean;
mod parse;

pub use clean::clean_address;
pub use parse::{parse_address, AddressComponents, AddressParseError};
