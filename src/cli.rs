//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and subcommands using the `clap` crate.
//! Global options can be provided via command-line flags or environment variables.

use crate::models::Category;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments for the AzerNews scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape every section into ./data
/// azernews_scraper scrape
///
/// # Scrape two sections into a custom directory
/// azernews_scraper --data-dir /srv/news scrape world culture
///
/// # Serve whatever artifacts exist
/// azernews_scraper serve --bind 0.0.0.0:5000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, global = true, env = "AZERNEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the per-category JSON files
    #[arg(short, long, global = true, env = "AZERNEWS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Site origin to scrape
    #[arg(long, global = true, env = "AZERNEWS_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, global = true, env = "AZERNEWS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Scrape homepage sections and write their JSON files
    Scrape {
        /// Sections to scrape (all of them when omitted)
        #[arg(value_enum)]
        categories: Vec<Category>,
    },
    /// Serve the JSON files over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "AZERNEWS_BIND")]
        bind: Option<SocketAddr>,
    },
    /// List the known sections and their files
    List,
}

impl Cli {
    /// Listen address given on the command line, if any.
    pub fn bind_override(&self) -> Option<SocketAddr> {
        match &self.command {
            Command::Serve { bind } => *bind,
            _ => None,
        }
    }
}

/// Categories requested by a `scrape` invocation; empty means all of them.
pub fn selected_categories(requested: &[Category]) -> Vec<Category> {
    if requested.is_empty() {
        Category::ALL.to_vec()
    } else {
        let mut seen = Vec::with_capacity(requested.len());
        for category in requested {
            if !seen.contains(category) {
                seen.push(*category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_scrape_all() {
        let cli = Cli::parse_from(["azernews_scraper", "scrape"]);
        assert_eq!(cli.command, Command::Scrape { categories: vec![] });
        assert_eq!(selected_categories(&[]), Category::ALL.to_vec());
    }

    #[test]
    fn test_cli_scrape_named_categories() {
        let cli = Cli::parse_from([
            "azernews_scraper",
            "scrape",
            "world",
            "armenian-azerbaijan-conflict",
            "world",
        ]);
        let Command::Scrape { categories } = cli.command else {
            panic!("expected scrape command");
        };
        assert_eq!(
            selected_categories(&categories),
            vec![Category::World, Category::Conflict]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        let res = Cli::try_parse_from(["azernews_scraper", "scrape", "sports"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "azernews_scraper",
            "serve",
            "--bind",
            "0.0.0.0:8000",
            "-d",
            "/tmp/data",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(cli.bind_override(), Some("0.0.0.0:8000".parse::<SocketAddr>().unwrap()));
    }
}
