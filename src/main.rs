//! # AzerNews Scraper
//!
//! Scrapes the homepage sections of [AzerNews](https://www.azernews.az)
//! (Nation, Analysis, Armenian Aggression, Armenian-Azerbaijani conflict,
//! World, Culture), enriches every teaser with its article page, writes one
//! JSON file per section, and serves those files over a read-only HTTP API.
//!
//! ## Usage
//!
//! ```sh
//! azernews_scraper scrape                 # every section into ./data
//! azernews_scraper scrape world culture   # just these two
//! azernews_scraper serve --bind 0.0.0.0:5000
//! ```
//!
//! ## Architecture
//!
//! Each section run is sequential:
//! 1. **Homepage**: Fetch the site origin and locate the section by heading
//! 2. **Stubs**: Extract the featured card and list rows
//! 3. **Details**: Fetch each article page in order (failures leave nulls)
//! 4. **Output**: Atomically replace the section's JSON file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command, selected_categories};
use config::Settings;
use models::Category;
use scrapers::{HttpPageSource, scrape_category};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let settings = Settings::load(&args).await?;

    match &args.command {
        Command::Scrape { categories } => run_scrape(&settings, categories).await,
        Command::Serve { .. } => api::serve(&settings).await,
        Command::List => {
            for category in Category::ALL {
                println!(
                    "{:<30} {:<32} {}",
                    category.key(),
                    category.heading(),
                    settings.artifact_path(category).display()
                );
            }
            Ok(())
        }
    }
}

/// Scrape the requested categories one after another.
///
/// A failing category is logged and the rest still run; the command fails
/// at the end if any category did.
#[instrument(level = "info", skip_all, fields(base_url = %settings.base_url))]
async fn run_scrape(settings: &Settings, requested: &[Category]) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    // Early check: the data dir must be writable before any network work.
    if let Err(e) = ensure_writable_dir(&settings.data_dir).await {
        error!(
            path = %settings.data_dir.display(),
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let source = HttpPageSource::new(settings)?;
    let categories = selected_categories(requested);
    info!(count = categories.len(), timeout = ?settings.request_timeout, "Starting scrape");

    let mut failed = Vec::new();
    let mut total_articles = 0;
    for category in categories {
        match scrape_category(&source, &settings.base_url, &settings.data_dir, category).await {
            Ok(report) => {
                debug!(category = %report.category, path = %report.path.display(), "Category written");
                total_articles += report.articles;
            }
            Err(e) => {
                error!(%category, error = %e, "Category scrape failed");
                failed.push(category.key());
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = total_articles,
        failed = failed.len(),
        "Scrape complete"
    );

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("scrape failed for: {}", failed.join(", ")).into())
    }
}
