use regex::Regex;

/// Normalizes a raw contact-block address string.
///
/// Rewrites run in order, each on the previous output:
/// 1. drop `[email ...]` tokens,
/// 2. drop a weekday name and everything after it (office hours),
/// 3. drop a `9am`/`10PM` time and everything after it,
/// 4. keep only the first `<number> <word> <suffix> ..., <ST> <zip>` match
///    and discard what follows the zip,
/// 5. turn newline runs into spaces,
/// 6. collapse whitespace runs,
/// 7. trim.
#[must_use]
pub fn clean_address(raw: &str) -> String {
    let email_re = Regex::new(r"\[email.*?\]").expect("valid regex");
    let weekday_re =
        Regex::new(r"(?is)\b(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b.*$")
            .expect("valid regex");
    let time_re = Regex::new(r"(?is)\d{1,2}(am|pm).*$").expect("valid regex");
    let street_re =
        Regex::new(r"(?is)(\d{1,5} \w+ (Rd|St|Dr|Ave|Blvd|Way|Ct|Ln)[^,]*, \w{2} \d{5}).*")
            .expect("valid regex");
    let newline_re = Regex::new(r"\n+").expect("valid regex");
    let space_re = Regex::new(r"\s+").expect("valid regex");

    let s = email_re.replace_all(raw, "");
    let s = weekday_re.replace(&s, "");
    let s = time_re.replace(&s, "");
    let s = street_re.replace(&s, "${1}");
    let s = newline_re.replace_all(&s, " ");
    let s = space_re.replace_all(&s, " ");
    s.trim().to_string()
}
