//! Startup snapshot of every category artifact.
//!
//! The snapshot is taken once when the server starts and never refreshed,
//! so `GET /api/articles` reflects the files as they were at that moment.
//! `GET /api/articles/{category}` bypasses it and reads the file per request.

use crate::config::artifact_path;
use crate::models::Category;
use crate::outputs::json::{self, ReadError};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Category key → article array, as loaded at startup.
#[derive(Debug, Clone)]
pub struct ArticleCache {
    loaded_at: DateTime<Utc>,
    by_category: BTreeMap<&'static str, Value>,
}

impl ArticleCache {
    /// Load every category. Missing or unreadable files load as `[]`.
    #[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
    pub async fn load(data_dir: &Path) -> Self {
        let mut by_category = BTreeMap::new();
        for category in Category::ALL {
            let path = artifact_path(data_dir, category);
            let articles = match json::read_category(&path).await {
                Ok(value @ Value::Array(_)) => value,
                Ok(_) => {
                    warn!(%category, path = %path.display(), "Artifact is not a JSON array; serving []");
                    Value::Array(Vec::new())
                }
                Err(ReadError::Missing) => {
                    debug!(%category, path = %path.display(), "No artifact yet; serving []");
                    Value::Array(Vec::new())
                }
                Err(e) => {
                    warn!(%category, path = %path.display(), error = %e, "Unreadable artifact; serving []");
                    Value::Array(Vec::new())
                }
            };
            by_category.insert(category.key(), articles);
        }

        let cache = Self {
            loaded_at: Utc::now(),
            by_category,
        };
        info!(
            articles = cache.article_count(),
            loaded_at = %cache.loaded_at.to_rfc3339(),
            "Loaded article cache"
        );
        cache
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// The full snapshot, keyed by category key.
    pub fn all(&self) -> &BTreeMap<&'static str, Value> {
        &self.by_category
    }

    /// Total number of cached articles across categories.
    pub fn article_count(&self) -> usize {
        self.by_category
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum()
    }
}
