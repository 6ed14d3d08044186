//! AzerNews homepage scraping.
//!
//! A category run follows a fixed, sequential pipeline:
//!
//! 1. **Homepage**: Fetch the site origin once
//! 2. **Section**: Locate the category's block by its `h2` heading
//! 3. **Stubs**: Extract the featured card and list rows ([`sections`])
//! 4. **Details**: Fetch each article page in order ([`detail`])
//! 5. **Output**: Replace the category's JSON artifact in one write
//!
//! # Submodules
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | [`PageSource`] seam and its `reqwest` implementation |
//! | [`layout`] | Per-category selectors and featured-card shape |
//! | [`sections`] | Section lookup and stub extraction |
//! | [`detail`] | Article page parsing |
//!
//! # Failure policy
//!
//! - Missing section: logged, the run writes an empty array
//! - Row without a link: skipped
//! - Article page failure: logged, the article keeps null details
//! - Homepage or write failure: the run fails and the old artifact stays

pub mod detail;
pub mod fetch;
pub mod layout;
pub mod sections;

pub use fetch::{HttpPageSource, PageSource};

use crate::models::{Category, EnrichedArticle};
use crate::outputs::json;
use detail::fetch_article_detail;
use futures::stream::{self, StreamExt};
use layout::SectionLayout;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Outcome of one successful category run.
#[derive(Debug)]
pub struct ScrapeReport {
    pub category: Category,
    pub path: PathBuf,
    pub articles: usize,
    /// Articles whose page yielded at least one paragraph.
    pub with_content: usize,
}

/// Scrape one category into memory without touching the disk.
///
/// Returns an empty list when the section is not on the homepage.
#[instrument(level = "info", skip(source))]
pub async fn collect_category<S: PageSource>(
    source: &S,
    base_url: &str,
    category: Category,
) -> Result<Vec<EnrichedArticle>, Box<dyn Error>> {
    let layout = SectionLayout::for_category(category);
    let homepage = source.fetch_html(base_url).await?;

    let Some(stubs) = sections::parse_section(&homepage, &layout, base_url)? else {
        warn!(heading = layout.heading, "Section not found on homepage; no articles this run");
        return Ok(Vec::new());
    };
    info!(count = stubs.len(), "Extracted article stubs");

    let articles: Vec<EnrichedArticle> = stream::iter(stubs)
        .then(|stub| async move {
            info!(title = ?stub.title, link = %stub.link, "Scraping article");
            let detail = fetch_article_detail(source, &stub.link).await;
            EnrichedArticle::new(stub, detail)
        })
        .collect()
        .await;

    Ok(articles)
}

/// Scrape one category and replace its artifact in `data_dir`.
#[instrument(level = "info", skip(source, data_dir))]
pub async fn scrape_category<S: PageSource>(
    source: &S,
    base_url: &str,
    data_dir: &Path,
    category: Category,
) -> Result<ScrapeReport, Box<dyn Error>> {
    let t0 = Instant::now();
    let articles = collect_category(source, base_url, category).await?;

    let path = crate::config::artifact_path(data_dir, category);
    json::write_category(&path, &articles).await?;

    let report = ScrapeReport {
        category,
        path,
        articles: articles.len(),
        with_content: articles.iter().filter(|a| !a.detail.content.is_empty()).count(),
    };
    info!(
        articles = report.articles,
        with_content = report.with_content,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        path = %report.path.display(),
        "Category scrape complete"
    );
    Ok(report)
}
