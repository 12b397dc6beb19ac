//! Lenient numeric prefix parsing for scraped cell text.
//!
//! Rate tables mix numbers with labels and punctuation (`"10x15"`,
//! `"125.00/mo"`, `"3 left"`). These helpers read the longest numeric
//! prefix after leading whitespace and ignore whatever follows.

/// Parses a leading decimal number, e.g. `" 125.50/mo"` → `125.5`.
///
/// Accepts an optional sign, an integer part, a fractional part, and an
/// exponent. Returns `None` when no digits are found or the value is not
/// finite.
pub(crate) fn parse_leading_float(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    trimmed[..i]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a leading base-10 integer, e.g. `"10' "` → `10`.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digit_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        return None;
    }

    trimmed[..i].parse::<i64>().ok()
}
