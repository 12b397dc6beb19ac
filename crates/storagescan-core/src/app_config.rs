use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a scrape run, read from `STORAGESCAN_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML file listing the facility websites to scrape.
    pub sites_path: PathBuf,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Pause between the platform check and rent-page discovery for a site.
    pub scraper_discovery_delay_ms: u64,
}
