//! Article page scraping.
//!
//! Every category links to the same article template, so a single parser
//! covers them all:
//!
//! | Field | Source |
//! |-------|--------|
//! | `author` | `div.author h6` |
//! | `author_img` | `div.author img[src]` |
//! | `publish_date` | `span.me-3` |
//! | `content` | `div.article-content p`, blank paragraphs dropped |

use super::fetch::PageSource;
use crate::models::ArticleDetail;
use crate::utils::element_text;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, error, instrument};

static AUTHOR_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.author").expect("static selector"));
static AUTHOR_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse("h6").expect("static selector"));
static AUTHOR_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("static selector"));
static PUBLISH_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.me-3").expect("static selector"));
static CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.article-content").expect("static selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector"));

/// Parse an article page. Missing elements become `None` or an empty list.
pub fn parse_article_detail(html: &str) -> ArticleDetail {
    let document = Html::parse_document(html);

    let author_block = document.select(&AUTHOR_BLOCK).next();
    let author = author_block
        .and_then(|block| block.select(&AUTHOR_NAME).next())
        .map(element_text);
    let author_img = author_block
        .and_then(|block| block.select(&AUTHOR_IMAGE).next())
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string);

    let publish_date = document.select(&PUBLISH_DATE).next().map(element_text);

    let content = document
        .select(&CONTENT)
        .next()
        .map(|body| {
            body.select(&PARAGRAPH)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    ArticleDetail {
        author,
        author_img,
        publish_date,
        content,
    }
}

/// Fetch and parse one article page.
///
/// Never fails: a fetch error is logged with the URL and an empty
/// [`ArticleDetail`] is returned so the article still makes it to disk.
#[instrument(level = "info", skip(source))]
pub async fn fetch_article_detail<S: PageSource>(source: &S, url: &str) -> ArticleDetail {
    match source.fetch_html(url).await {
        Ok(html) => {
            let detail = parse_article_detail(&html);
            debug!(
                paragraphs = detail.content.len(),
                has_author = detail.author.is_some(),
                "Parsed article page"
            );
            detail
        }
        Err(e) => {
            error!(%url, error = %e, "Article fetch failed; keeping stub without details");
            ArticleDetail::default()
        }
    }
}

#[cfg(test)]
pub(crate) const ARTICLE: &str = include_str!("testdata/article.html");
