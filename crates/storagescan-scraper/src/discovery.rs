//! Platform detection and rent-page discovery on a site's landing page.

use std::collections::HashSet;

use scraper::Html;
use url::Url;

use crate::dom::selector;
use crate::error::ScraperError;

/// Lowercased marker every Automatit-built page carries in its markup.
pub const PLATFORM_MARKER: &str = "automatit";

/// Path fragment that identifies a facility rent page link.
pub const RENT_PAGE_PATH: &str = "/self-storage/";

/// Returns `true` when the raw page body mentions the platform, in any case.
#[must_use]
pub fn is_automatit_html(html: &str) -> bool {
    html.to_lowercase().contains(PLATFORM_MARKER)
}

/// Collects rent page links from a landing page.
///
/// Every `a[href]` whose raw `href` contains [`RENT_PAGE_PATH`] is resolved
/// against `base_url`. Duplicates (by absolute URL) are dropped, keeping the
/// first occurrence. Hrefs that cannot be resolved are skipped.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` itself is not an
/// absolute URL.
pub fn rent_page_links(html: &str, base_url: &str) -> Result<Vec<String>, ScraperError> {
    let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    let page = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for anchor in page.select(&selector("a[href]")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(RENT_PAGE_PATH) {
            continue;
        }
        match base.join(href) {
            Ok(absolute) => {
                let absolute = String::from(absolute);
                if seen.insert(absolute.clone()) {
                    links.push(absolute);
                }
            }
            Err(e) => {
                tracing::debug!(href, error = %e, "skipping unresolvable rent page link");
            }
        }
    }

    Ok(links)
}
