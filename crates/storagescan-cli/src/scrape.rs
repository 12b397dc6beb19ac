//! `scrape` and `check` command handlers.
//!
//! Facility records stream out as JSON lines while sites are processed;
//! per-site summaries and diagnostics go to stderr. Site and page failures
//! are reported, never fatal. Only configuration and output I/O errors abort
//! the run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use storagescan_core::{load_sites, AppConfig, NormalizedFacility, SitesFile};
use storagescan_scraper::{AutomatitClient, SiteReport, SiteScraper, SiteStatus};

/// Options for a `scrape` run.
#[derive(Debug)]
pub(crate) struct ScrapeArgs {
    pub sites: Option<PathBuf>,
    pub urls: Vec<String>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Resolves the base URLs to scrape.
///
/// URLs given on the command line win over any site list file. Otherwise the
/// file from `--sites`, or the configured default, is loaded and validated.
pub(crate) fn resolve_sites(
    config: &AppConfig,
    sites: Option<&Path>,
    urls: &[String],
) -> anyhow::Result<Vec<String>> {
    if !urls.is_empty() {
        return Ok(SitesFile::from_urls(urls)?.urls());
    }

    let path = sites.unwrap_or(&config.sites_path);
    let sites_file = load_sites(path)
        .with_context(|| format!("failed to load site list from {}", path.display()))?;
    Ok(sites_file.urls())
}

fn build_scraper(config: &AppConfig) -> anyhow::Result<SiteScraper> {
    let client =
        AutomatitClient::new(config.scraper_request_timeout_secs, &config.scraper_user_agent)?;
    Ok(SiteScraper::new(
        client,
        Duration::from_millis(config.scraper_discovery_delay_ms),
    ))
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Writes one facility as a single JSON line.
pub(crate) fn write_json_line<W: Write>(out: &mut W, facility: &NormalizedFacility) -> io::Result<()> {
    serde_json::to_writer(&mut *out, facility)?;
    out.write_all(b"\n")
}

/// One-line human summary of a site's outcome.
pub(crate) fn summary_line(report: &SiteReport) -> String {
    match report.status {
        SiteStatus::NotSupported => format!("{}: not an Automatit site, skipped", report.base_url),
        SiteStatus::Scraped => format!(
            "{}: {} facilities from {} rent pages ({} unmatched, {} failed)",
            report.base_url,
            report.facilities,
            report.rent_pages,
            report.unmatched.len(),
            report.failures.len()
        ),
    }
}

/// Scrapes `sites` in order, writing each facility to `out` as it arrives.
///
/// Stops before the next site once a write has failed, so a closed output
/// does not keep the run fetching pages nobody will read.
pub(crate) async fn scrape_to_writer<W: Write>(
    scraper: &SiteScraper,
    sites: &[String],
    out: &mut W,
) -> anyhow::Result<Vec<SiteReport>> {
    let mut reports = Vec::with_capacity(sites.len());
    let mut write_error: Option<io::Error> = None;

    for site in sites {
        let report = scraper
            .scrape_site(site, |facility| {
                tracing::debug!(
                    facility = %facility.name,
                    units = facility.rents.len(),
                    available = facility.available_count(),
                    lowest_rent = ?facility.lowest_available_rent(),
                    "writing facility record"
                );
                if write_error.is_none() {
                    if let Err(e) = write_json_line(&mut *out, facility) {
                        write_error = Some(e);
                    }
                }
            })
            .await;
        reports.push(report);

        if let Some(e) = write_error {
            return Err(e).with_context(|| format!("failed to write facility records for {site}"));
        }
    }

    out.flush().context("failed to flush facility records")?;
    Ok(reports)
}

/// Scrapes every resolved site in order and streams facility records.
///
/// # Errors
///
/// Returns an error if the site list is invalid, the HTTP client cannot be
/// built, or writing the output fails.
pub(crate) async fn run_scrape(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    let sites = resolve_sites(config, args.sites.as_deref(), &args.urls)?;
    if sites.is_empty() {
        eprintln!("no sites configured; nothing to scrape");
        return Ok(());
    }

    if args.dry_run {
        eprintln!("dry-run: would scrape {} sites:", sites.len());
        for site in &sites {
            eprintln!("  {site}");
        }
        return Ok(());
    }

    let scraper = build_scraper(config)?;
    let mut out = open_output(args.output.as_deref())?;
    tracing::info!(sites = sites.len(), "starting scrape");
    let reports = scrape_to_writer(&scraper, &sites, &mut out).await?;

    for report in &reports {
        eprintln!("{}", summary_line(report));
        for failure in &report.failures {
            eprintln!("  failed {}: {}", failure.url, failure.error);
        }
    }

    let facilities: usize = reports.iter().map(|r| r.facilities).sum();
    let skipped = reports
        .iter()
        .filter(|r| r.status == SiteStatus::NotSupported)
        .count();
    if skipped > 0 {
        tracing::warn!(skipped, total_sites = reports.len(), "some sites were not Automatit sites");
    }
    eprintln!(
        "scraped {facilities} facilities across {} sites",
        reports.len() - skipped
    );
    Ok(())
}

/// Prints `supported` or `unsupported` for each URL.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub(crate) async fn run_check(config: &AppConfig, urls: &[String]) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    for url in urls {
        let verdict = if scraper.is_automatit_site(url).await {
            "supported"
        } else {
            "unsupported"
        };
        println!("{url}\t{verdict}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
