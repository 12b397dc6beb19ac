//! Site-level orchestration: platform check, rent-page discovery, and
//! per-page extraction into [`NormalizedFacility`] records.
//!
//! Sites and pages are processed sequentially. A parsed document never lives
//! across an `.await`; each page is fetched, then extracted synchronously.

use std::time::Duration;

use chrono::{DateTime, Utc};
use scraper::Html;
use storagescan_core::NormalizedFacility;

use crate::address::parse_address;
use crate::client::AutomatitClient;
use crate::discovery::{is_automatit_html, rent_page_links};
use crate::dom::text_of;
use crate::error::ScraperError;
use crate::normalize::normalize_rent;
use crate::template::select_template;

/// Whether a site was recognised as an Automatit site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    /// Landing page missing the platform marker, or unreachable.
    NotSupported,
    Scraped,
}

/// A rent page that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of scraping one site.
#[derive(Debug, Clone)]
pub struct SiteReport {
    pub base_url: String,
    pub status: SiteStatus,
    /// Number of distinct rent pages discovered.
    pub rent_pages: usize,
    /// Number of facility records emitted.
    pub facilities: usize,
    /// Rent pages that matched no known template.
    pub unmatched: Vec<String>,
    pub failures: Vec<PageFailure>,
}

impl SiteReport {
    fn new(base_url: &str, status: SiteStatus) -> Self {
        Self {
            base_url: base_url.to_owned(),
            status,
            rent_pages: 0,
            facilities: 0,
            unmatched: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Scrapes Automatit facility sites one page at a time.
#[derive(Debug, Clone)]
pub struct SiteScraper {
    client: AutomatitClient,
    discovery_delay: Duration,
}

impl SiteScraper {
    /// `discovery_delay` is the pause between the platform check and the
    /// rent-page discovery fetch of the same landing page.
    #[must_use]
    pub fn new(client: AutomatitClient, discovery_delay: Duration) -> Self {
        Self {
            client,
            discovery_delay,
        }
    }

    /// Fetches the landing page and checks it for the platform marker.
    ///
    /// A failed fetch counts as unsupported.
    pub async fn is_automatit_site(&self, base_url: &str) -> bool {
        match self.client.fetch_html(base_url).await {
            Ok(html) => is_automatit_html(&html),
            Err(e) => {
                tracing::warn!(site = base_url, error = %e, "platform check fetch failed");
                false
            }
        }
    }

    /// Fetches the landing page and returns its distinct rent page URLs.
    ///
    /// A failed fetch or an unusable base URL yields an empty list.
    pub async fn find_rent_pages(&self, base_url: &str) -> Vec<String> {
        let html = match self.client.fetch_html(base_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(site = base_url, error = %e, "rent page discovery fetch failed");
                return Vec::new();
            }
        };

        match rent_page_links(&html, base_url) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(site = base_url, error = %e, "rent page discovery failed");
                Vec::new()
            }
        }
    }

    /// Fetches one rent page and extracts its facility.
    ///
    /// `Ok(None)` means the page matched no known template.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the page cannot be fetched.
    pub async fn scrape_rent_page(
        &self,
        url: &str,
    ) -> Result<Option<NormalizedFacility>, ScraperError> {
        let html = self.client.fetch_html(url).await?;
        Ok(extract_facility(&html, url, Utc::now()))
    }

    /// Scrapes every rent page of one site, handing each facility to `emit`
    /// as soon as it is extracted.
    ///
    /// Page failures are recorded in the report and do not stop the site.
    pub async fn scrape_site<F>(&self, base_url: &str, mut emit: F) -> SiteReport
    where
        F: FnMut(&NormalizedFacility),
    {
        if !self.is_automatit_site(base_url).await {
            tracing::info!(site = base_url, "not an Automatit site, skipping");
            return SiteReport::new(base_url, SiteStatus::NotSupported);
        }

        tokio::time::sleep(self.discovery_delay).await;

        let pages = self.find_rent_pages(base_url).await;
        tracing::info!(site = base_url, count = pages.len(), "discovered rent pages");

        let mut report = SiteReport::new(base_url, SiteStatus::Scraped);
        report.rent_pages = pages.len();

        for page_url in pages {
            match self.scrape_rent_page(&page_url).await {
                Ok(Some(facility)) => {
                    tracing::debug!(
                        page = %page_url,
                        template = facility.template,
                        units = facility.rents.len(),
                        "extracted facility"
                    );
                    emit(&facility);
                    report.facilities += 1;
                }
                Ok(None) => {
                    tracing::warn!(page = %page_url, "no site template matched, skipping page");
                    report.unmatched.push(page_url);
                }
                Err(e) => {
                    tracing::error!(page = %page_url, error = %e, "failed to scrape rent page");
                    report.failures.push(PageFailure {
                        url: page_url,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Scrapes each site in order and returns one report per site.
    pub async fn scrape_sites<F>(&self, base_urls: &[String], mut emit: F) -> Vec<SiteReport>
    where
        F: FnMut(&NormalizedFacility),
    {
        let mut reports = Vec::with_capacity(base_urls.len());
        for base_url in base_urls {
            reports.push(self.scrape_site(base_url, &mut emit).await);
        }
        reports
    }
}

/// Runs the extraction pipeline over one rent page body.
///
/// Selects the first matching template, then reads the title, address
/// components, coordinates, and one normalized rent per unit row. Returns
/// `None` when no template matches. An address that cannot be split into
/// components leaves those fields `None`.
#[must_use]
pub fn extract_facility(
    html: &str,
    page_url: &str,
    scraped_at: DateTime<Utc>,
) -> Option<NormalizedFacility> {
    let page = Html::parse_document(html);
    let (template, found) = select_template(&page)?;

    let components = match parse_address(&found.address) {
        Ok(components) => Some(components),
        Err(e) => {
            tracing::warn!(page = page_url, error = %e, "could not split facility address");
            None
        }
    };

    let lat_lng = (template.extract_lat_lng)(&page);
    let page_offer = template.page_special_offer.and_then(|read| read(&page));

    let rents = (template.extract_units)(&page)
        .iter()
        .map(|unit| {
            let available = (template.is_available)(&page, unit.element);
            normalize_rent(unit, available, page_offer.as_deref(), page_url, scraped_at)
        })
        .collect();

    let (address, city, state, zip) = match components {
        Some(c) => (Some(c.street_line), Some(c.city), Some(c.state), Some(c.zip)),
        None => (None, None, None, None),
    };

    Some(NormalizedFacility {
        name: text_of(page.root_element(), "title"),
        address,
        zip,
        city,
        state,
        latitude: lat_lng.map(|p| p.lat),
        longitude: lat_lng.map(|p| p.lng),
        website: page_url.to_owned(),
        phone: found.phone,
        template: template.id,
        rents,
    })
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
