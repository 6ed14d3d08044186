//! Data models for scraped homepage sections and their articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Category`]: The fixed set of homepage sections that are scraped
//! - [`ArticleStub`]: A homepage teaser (title, link, thumbnail, summary)
//! - [`ArticleDetail`]: Author, date, and body text from an article page
//! - [`EnrichedArticle`]: A stub merged with its detail, as persisted to disk
//!
//! Field names serialize exactly as the JSON artifacts and read API expect
//! (`title`, `link`, `thumbnail`, `summary`, `author`, `author_img`,
//! `publish_date`, `content`).

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A homepage section scraped into its own JSON artifact.
///
/// Keys are the stable identifiers used on the command line, in the read
/// API routes, and as map keys in `GET /api/articles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Category {
    #[value(name = "nation")]
    Nation,
    #[value(name = "analysis")]
    Analysis,
    #[value(name = "armenian-aggression")]
    ArmenianAggression,
    #[value(name = "armenian-azerbaijan-conflict")]
    Conflict,
    #[value(name = "world")]
    World,
    #[value(name = "culture")]
    Culture,
}

impl Category {
    /// Every category, in the order they are scraped and listed.
    pub const ALL: [Category; 6] = [
        Category::Nation,
        Category::Analysis,
        Category::ArmenianAggression,
        Category::Conflict,
        Category::World,
        Category::Culture,
    ];

    /// The key used in routes, CLI arguments, and the aggregated API response.
    pub fn key(self) -> &'static str {
        match self {
            Category::Nation => "nation",
            Category::Analysis => "analysis",
            Category::ArmenianAggression => "armenian-aggression",
            Category::Conflict => "armenian-azerbaijan-conflict",
            Category::World => "world",
            Category::Culture => "culture",
        }
    }

    /// The section heading text as printed on the homepage.
    pub fn heading(self) -> &'static str {
        match self {
            Category::Nation => "Nation",
            Category::Analysis => "Analysis",
            Category::ArmenianAggression => "Armenian Aggression",
            Category::Conflict => "Armenian-Azerbaijani conflict",
            Category::World => "World",
            Category::Culture => "Culture",
        }
    }

    /// File name of the category's artifact inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Category::Nation => "azernews_nation.json",
            Category::Analysis => "azernews_analysis.json",
            Category::ArmenianAggression => "azernews_aggression_full.json",
            Category::Conflict => "azernews_conflict.json",
            Category::World => "azernews_world.json",
            Category::Culture => "azernews_culture.json",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive lookup by key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// An article teaser extracted from a homepage section.
///
/// `title` and `thumbnail` are `None` when the source markup lacks them.
///
/// `summary` has three states:
/// - `None`: the key is not written (list rows, Armenian Aggression)
/// - `Some(None)`: a featured card without a paragraph, written as `null`
/// - `Some(Some(text))`: a featured card's lead paragraph
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleStub {
    pub title: Option<String>,
    /// Absolute article URL.
    pub link: String,
    pub thumbnail: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,
}

/// Keeps an explicit `null` apart from a missing key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Details scraped from an article's own page.
///
/// Always structurally complete: a failed fetch yields [`ArticleDetail::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDetail {
    pub author: Option<String>,
    pub author_img: Option<String>,
    /// Free-form date text as printed by the site.
    pub publish_date: Option<String>,
    /// Non-empty body paragraphs in document order.
    #[serde(default)]
    pub content: Vec<String>,
}

/// A stub and its detail flattened into one record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub stub: ArticleStub,
    #[serde(flatten)]
    pub detail: ArticleDetail,
}

impl EnrichedArticle {
    pub fn new(stub: ArticleStub, detail: ArticleDetail) -> Self {
        Self { stub, detail }
    }
}
