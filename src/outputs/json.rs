//! JSON artifact output.
//!
//! Each category is persisted as one pretty-printed JSON array, UTF-8,
//! four-space indent, non-ASCII left unescaped:
//!
//! ```text
//! data_dir/
//! ├── azernews_nation.json
//! ├── azernews_analysis.json
//! ├── azernews_aggression_full.json
//! ├── azernews_conflict.json
//! ├── azernews_world.json
//! └── azernews_culture.json
//! ```
//!
//! # Atomic replacement
//!
//! The array is written to a sibling `.tmp` file which is then renamed over
//! the final path, so readers never observe a half-written artifact.

use crate::models::EnrichedArticle;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::error::Error;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `value` with a four-space indent.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the artifact at `path` with `articles`.
///
/// # Errors
///
/// Fails if serialization, the temporary write, or the rename fails. The
/// previous artifact is left in place in every failure case.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = articles.len()))]
pub async fn write_category(path: &Path, articles: &[EnrichedArticle]) -> Result<(), Box<dyn Error>> {
    let json = to_pretty_json(articles)?;
    let tmp = temp_path(path);

    if let Err(e) = fs::write(&tmp, &json).await {
        error!(tmp = %tmp.display(), error = %e, "Failed to write temporary JSON file");
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        error!(tmp = %tmp.display(), error = %e, "Failed to move JSON file into place");
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    info!(bytes = json.len(), "Wrote category JSON");
    Ok(())
}

/// Why an artifact could not be read back.
#[derive(Debug)]
pub enum ReadError {
    /// No artifact at that path (never scraped, or deleted).
    Missing,
    Io(std::io::Error),
    Malformed(serde_json::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Missing => f.write_str("file not found"),
            ReadError::Io(e) => write!(f, "failed to read file: {e}"),
            ReadError::Malformed(e) => write!(f, "file is not valid JSON: {e}"),
        }
    }
}

impl Error for ReadError {}

/// Read an artifact back as raw JSON, without reshaping it.
pub async fn read_category(path: &Path) -> Result<serde_json::Value, ReadError> {
    let bytes = fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReadError::Missing,
        _ => ReadError::Io(e),
    })?;
    serde_json::from_slice(&bytes).map_err(ReadError::Malformed)
}
