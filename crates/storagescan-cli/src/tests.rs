use std::path::PathBuf;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storagescan"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn scrape_defaults_to_configured_site_list() {
    let cli = Cli::try_parse_from(["storagescan", "scrape"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Scrape {
            sites,
            urls,
            output,
            dry_run,
        }) => {
            assert!(sites.is_none());
            assert!(urls.is_empty());
            assert!(output.is_none());
            assert!(!dry_run);
        }
        other => panic!("expected scrape command, got {other:?}"),
    }
}

#[test]
fn scrape_accepts_repeated_urls() {
    let cli = Cli::try_parse_from([
        "storagescan",
        "scrape",
        "--url",
        "https://beltonselfstorage.com/",
        "--url",
        "https://keyserstorage.com/",
        "--output",
        "rates.jsonl",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Scrape {
            urls,
            output,
            dry_run,
            ..
        }) => {
            assert_eq!(
                urls,
                vec!["https://beltonselfstorage.com/", "https://keyserstorage.com/"]
            );
            assert_eq!(output, Some(PathBuf::from("rates.jsonl")));
            assert!(dry_run);
        }
        other => panic!("expected scrape command, got {other:?}"),
    }
}

#[test]
fn scrape_accepts_sites_file() {
    let cli = Cli::try_parse_from(["storagescan", "scrape", "--sites", "config/other.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape { sites: Some(ref p), .. }) if p == &PathBuf::from("config/other.yaml")
    ));
}

#[test]
fn check_requires_at_least_one_url() {
    assert!(Cli::try_parse_from(["storagescan", "check"]).is_err());
}

#[test]
fn check_collects_urls() {
    let cli = Cli::try_parse_from(["storagescan", "check", "https://a.example/", "https://b.example/"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Check { urls }) => assert_eq!(urls.len(), 2),
        other => panic!("expected check command, got {other:?}"),
    }
}

#[test]
fn help_is_answered_by_the_parser() {
    let err = Cli::try_parse_from(["storagescan", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

    let err = Cli::try_parse_from(["storagescan", "scrape", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
