//! HTTP client for fetching facility site pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Thin wrapper over `reqwest::Client` that fetches HTML bodies.
///
/// Non-2xx responses are surfaced as [`ScraperError::UnexpectedStatus`] so
/// callers can tell "page unreachable" apart from "page had no usable markup".
#[derive(Debug, Clone)]
pub struct AutomatitClient {
    client: Client,
}

impl AutomatitClient {
    /// Creates a client with the configured request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] — network or TLS failure, or an unreadable body.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
