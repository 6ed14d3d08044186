//! Small helpers shared by the scrapers and output writers.
//!
//! This module provides:
//! - Inline-style image extraction for `background-image: url('...')` thumbnails
//! - Relative-to-absolute link resolution against the site origin
//! - Element text collection with whitespace trimming
//! - File system validation for the data directory

use scraper::ElementRef;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const STYLE_URL_OPEN: &str = "url('";
const STYLE_URL_CLOSE: &str = "')";

/// Pull the image URL out of an inline `background-image` style.
///
/// Returns the text between the first `url('` and the following `')`.
/// Anything else (other quoting, no marker, empty input) yields `None`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     extract_image_from_style("background-image: url('/a.jpg');"),
///     Some("/a.jpg".to_string())
/// );
/// assert_eq!(extract_image_from_style(""), None);
/// ```
pub fn extract_image_from_style(style: &str) -> Option<String> {
    let start = style.find(STYLE_URL_OPEN)? + STYLE_URL_OPEN.len();
    let rest = &style[start..];
    let end = rest.find(STYLE_URL_CLOSE).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Resolve an href against the site origin.
///
/// Hrefs that already carry an `http`/`https` scheme are returned unchanged;
/// anything else is appended to `base` as-is. The site only emits
/// root-relative hrefs, so no path joining is needed.
pub fn normalize_link(href: &str, base: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base}{href}")
    }
}

/// Collect an element's text nodes and trim the result.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Sync probe: simpler error surface than the async variant.
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Data directory is writable");
    Ok(())
}
