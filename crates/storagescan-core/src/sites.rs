use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One facility website to scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the facility site, e.g. `"https://beltonselfstorage.com/"`.
    pub url: String,
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl SiteConfig {
    /// Comparison key used to detect duplicate entries: lower-cased, with
    /// any trailing slash removed.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        self.url.trim().trim_end_matches('/').to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfig>,
}

impl SitesFile {
    /// Builds a validated site list from bare URLs, e.g. command-line input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` under the same rules as [`load_sites`].
    pub fn from_urls(urls: &[String]) -> Result<Self, ConfigError> {
        let sites_file = Self {
            sites: urls
                .iter()
                .map(|url| SiteConfig {
                    url: url.clone(),
                    name: None,
                    notes: None,
                })
                .collect(),
        };
        validate_sites(&sites_file)?;
        Ok(sites_file)
    }

    /// Base URLs in file order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.sites.iter().map(|s| s.url.trim().to_string()).collect()
    }
}

/// Load and validate the site list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SitesFileParse)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for site in &sites_file.sites {
        let url = site.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "site url must be non-empty".to_string(),
            ));
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site url '{url}' must start with http:// or https://"
            )));
        }

        if !seen.insert(site.dedup_key()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site url: '{url}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
