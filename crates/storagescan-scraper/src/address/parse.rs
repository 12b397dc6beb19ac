use regex::{Captures, Regex};

/// Street line, city, state, and zip split out of a cleaned address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressComponents {
    pub street_line: String,
    pub city: String,
    /// Upper-cased two-letter state or province abbreviation.
    pub state: String,
    /// US zip (`76513`, `76513-1234`) or Canadian postal code (`B0J 1A0`).
    pub zip: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address is empty")]
    Empty,
    #[error("unrecognized address format: \"{0}\"")]
    Unrecognized(String),
}

const ZIP: &str = r"(?P<zip>\d{5}(?:-\d{4})?|[A-Z]\d[A-Z] ?\d[A-Z]\d)";
const COUNTRY_SUFFIX: &str = r"(?:\s*,?\s*(?:USA|US|United States|Canada))?";

/// Parses a single-line freeform address into its components.
///
/// Two layouts are recognised, tried in order:
/// - comma-separated: `123 Main St, Suite 4, Belton, TX 76513`
///   (commas may lack the following space, as some contact blocks emit)
/// - street-suffix anchored: `123 Main St Belton, TX 76513`
///
/// # Errors
///
/// Returns [`AddressParseError::Empty`] for blank input and
/// [`AddressParseError::Unrecognized`] when neither layout matches.
pub fn parse_address(text: &str) -> Result<AddressComponents, AddressParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AddressParseError::Empty);
    }

    let comma_re = Regex::new(&format!(
        r"(?i)^(?P<street>.+?)\s*,\s*(?P<city>[^,]+?)(?:\s*,\s*|\s+)(?P<state>[A-Z]{{2}})\.?\s*,?\s*{ZIP}{COUNTRY_SUFFIX}$"
    ))
    .expect("valid regex");

    let suffix_re = Regex::new(&format!(
        r"(?i)^(?P<street>\d+\S*\s.*?\b(?:Rd|Road|St|Street|Dr|Drive|Ave|Avenue|Blvd|Boulevard|Way|Ct|Court|Ln|Lane|Hwy|Highway|Pkwy|Parkway)\.?)\s+(?P<city>[^,\d]+?)(?:\s*,\s*|\s+)(?P<state>[A-Z]{{2}})\.?\s*,?\s*{ZIP}{COUNTRY_SUFFIX}$"
    ))
    .expect("valid regex");

    for re in [&comma_re, &suffix_re] {
        if let Some(caps) = re.captures(text) {
            if let Some(components) = components_from(&caps) {
                return Ok(components);
            }
        }
    }

    Err(AddressParseError::Unrecognized(text.to_string()))
}

fn components_from(caps: &Captures<'_>) -> Option<AddressComponents> {
    let street_line = caps.name("street")?.as_str().trim().to_string();
    let city = caps.name("city")?.as_str().trim().to_string();
    if street_line.is_empty() || city.is_empty() {
        return None;
    }
    Some(AddressComponents {
        street_line,
        city,
        state: caps.name("state")?.as_str().to_uppercase(),
        zip: caps.name("zip")?.as_str().to_uppercase(),
    })
}
