use std::io::Write as _;

use storagescan_core::{Environment, NormalizedRent};
use storagescan_scraper::PageFailure;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(sites_path: PathBuf) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        sites_path,
        scraper_request_timeout_secs: 5,
        scraper_user_agent: "storagescan-test/0.1".to_string(),
        scraper_discovery_delay_ms: 0,
    }
}

fn report(status: SiteStatus) -> SiteReport {
    SiteReport {
        base_url: "https://beltonselfstorage.com/".to_string(),
        status,
        rent_pages: 3,
        facilities: 2,
        unmatched: vec!["https://beltonselfstorage.com/self-storage/old".to_string()],
        failures: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// resolve_sites
// ---------------------------------------------------------------------------

#[test]
fn command_line_urls_override_site_list() {
    let config = test_config(PathBuf::from("/nonexistent/sites.yaml"));
    let urls = vec!["https://keyserstorage.com/".to_string()];
    let sites = resolve_sites(&config, None, &urls).unwrap();
    assert_eq!(sites, vec!["https://keyserstorage.com/"]);
}

#[test]
fn command_line_urls_are_validated() {
    let config = test_config(PathBuf::from("/nonexistent/sites.yaml"));
    let urls = vec!["keyserstorage.com".to_string()];
    assert!(resolve_sites(&config, None, &urls).is_err());
}

#[test]
fn sites_flag_overrides_configured_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "sites:\n  - url: https://beltonselfstorage.com/\n  - url: https://keyserstorage.com/"
    )
    .unwrap();

    let config = test_config(PathBuf::from("/nonexistent/sites.yaml"));
    let sites = resolve_sites(&config, Some(file.path()), &[]).unwrap();
    assert_eq!(
        sites,
        vec!["https://beltonselfstorage.com/", "https://keyserstorage.com/"]
    );
}

#[test]
fn missing_site_list_is_an_error() {
    let config = test_config(PathBuf::from("/nonexistent/sites.yaml"));
    let err = resolve_sites(&config, None, &[]).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sites.yaml"));
}

// ---------------------------------------------------------------------------
// output
// ---------------------------------------------------------------------------

#[test]
fn write_json_line_emits_one_line_per_facility() {
    let facility = NormalizedFacility {
        name: "Belton Self Storage".to_string(),
        address: Some("123 Main St".to_string()),
        zip: Some("76513".to_string()),
        city: Some("Belton".to_string()),
        state: Some("TX".to_string()),
        latitude: None,
        longitude: None,
        website: "https://beltonselfstorage.com/self-storage/belton-tx".to_string(),
        phone: "(254) 555-0100".to_string(),
        template: 1,
        rents: Vec::<NormalizedRent>::new(),
    };

    let mut buf: Vec<u8> = Vec::new();
    write_json_line(&mut buf, &facility).unwrap();
    write_json_line(&mut buf, &facility).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["name"], "Belton Self Storage");
    assert_eq!(value["template"], 1);
}

#[test]
fn summary_for_unsupported_site() {
    let line = summary_line(&report(SiteStatus::NotSupported));
    assert_eq!(line, "https://beltonselfstorage.com/: not an Automatit site, skipped");
}

#[test]
fn summary_counts_pages_and_failures() {
    let mut scraped = report(SiteStatus::Scraped);
    scraped.failures.push(PageFailure {
        url: "https://beltonselfstorage.com/self-storage/waco-tx".to_string(),
        error: "unexpected HTTP status 500".to_string(),
    });
    assert_eq!(
        summary_line(&scraped),
        "https://beltonselfstorage.com/: 2 facilities from 3 rent pages (1 unmatched, 1 failed)"
    );
}

// ---------------------------------------------------------------------------
// scrape_to_writer
// ---------------------------------------------------------------------------

/// Output whose reader has gone away.
struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const LANDING: &str = r#"<html><body>
  <a href="/self-storage/belton-tx">Belton</a>
  <footer>Website by Automatit</footer>
</body></html>"#;

const FACILITY: &str = r#"<html><head><title>Belton Storage</title></head><body>
  <div id="facility-info">
    <div class="contact">123 Main St, Belton, TX 76513 <span class="phone">(254) 555-0100</span></div>
  </div>
  <div class="unit-row available-unit"><div class="unit-size">10x10</div><div class="monthly-rent">$99.00</div></div>
</body></html>"#;

async fn facility_site(landing_fetches: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LANDING, "text/html"))
        .expect(landing_fetches)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/self-storage/belton-tx"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FACILITY, "text/html"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn scrape_to_writer_streams_every_site() {
    let first = facility_site(2).await;
    let second = facility_site(2).await;
    let sites = vec![format!("{}/", first.uri()), format!("{}/", second.uri())];
    let scraper = build_scraper(&test_config(PathBuf::from("unused.yaml"))).unwrap();

    let mut buf: Vec<u8> = Vec::new();
    let reports = scrape_to_writer(&scraper, &sites, &mut buf).await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2);
}

#[tokio::test]
async fn write_failure_stops_before_next_site() {
    // Platform check plus discovery on the first site only.
    let first = facility_site(2).await;
    let second = facility_site(0).await;
    let sites = vec![format!("{}/", first.uri()), format!("{}/", second.uri())];
    let scraper = build_scraper(&test_config(PathBuf::from("unused.yaml"))).unwrap();

    let err = scrape_to_writer(&scraper, &sites, &mut ClosedPipe)
        .await
        .unwrap_err();
    assert!(err.to_string().contains(&sites[0]));
}
