mod scrape;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storagescan")]
#[command(about = "Scrape self-storage unit rates from Automatit facility sites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every rent page of each site and write one JSON record per facility
    Scrape {
        /// Site list YAML file (defaults to `STORAGESCAN_SITES_PATH`)
        #[arg(long)]
        sites: Option<PathBuf>,

        /// Scrape this base URL instead of the site list; repeatable
        #[arg(long = "url")]
        urls: Vec<String>,

        /// Write JSON lines to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// List the sites that would be scraped without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Report whether each site is built on the Automatit platform
    Check {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `--help` must not depend on STORAGESCAN_* values.
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = storagescan_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::info!(
        env = %config.env,
        sites_path = %config.sites_path.display(),
        "storagescan starting"
    );

    match command {
        Commands::Scrape {
            sites,
            urls,
            output,
            dry_run,
        } => {
            let args = scrape::ScrapeArgs {
                sites,
                urls,
                output,
                dry_run,
            };
            scrape::run_scrape(&config, &args).await?;
        }
        Commands::Check { urls } => scrape::run_check(&config, &urls).await?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays a clean JSON-lines stream. `RUST_LOG`
/// overrides the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests;
