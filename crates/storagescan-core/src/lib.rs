pub mod app_config;
pub mod config;
pub mod facility;
pub mod sites;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use facility::{NormalizedFacility, NormalizedRent};
pub use sites::{load_sites, SiteConfig, SitesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[source] serde_yaml::Error),

    #[error("sites file validation failed: {0}")]
    Validation(String),
}
