//! Homepage section extraction.
//!
//! A section is found by its `h2` heading, then turned into an ordered list
//! of [`ArticleStub`]s: the featured card first (when the layout has one and
//! it is complete), then every list row in document order.

use super::layout::{FeaturedLayout, SectionLayout};
use crate::models::ArticleStub;
use crate::utils::{element_text, extract_image_from_style, normalize_link};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, instrument};

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("static selector"));
static FEATURED_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("static selector"));
static FEATURED_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("static selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector"));
static ROW_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.news-item-sm").expect("static selector"));
static ROW_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h4").expect("static selector"));
static ROW_THUMB: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.bg-thumb").expect("static selector"));

/// Compile a layout selector, turning a parse failure into an owned error.
fn selector(css: &str) -> Result<Selector, Box<dyn Error>> {
    Selector::parse(css).map_err(|e| format!("invalid selector {css:?}: {e}").into())
}

/// Find the first `container` element whose first `h2` reads `heading`.
///
/// The comparison trims surrounding whitespace and ignores case.
pub fn locate_section<'a>(
    document: &'a Html,
    container: &str,
    heading: &str,
) -> Result<Option<ElementRef<'a>>, Box<dyn Error>> {
    let container = selector(container)?;
    let wanted = heading.trim().to_lowercase();
    Ok(document.select(&container).find(|block| {
        block
            .select(&HEADING)
            .next()
            .is_some_and(|h2| element_text(h2).to_lowercase() == wanted)
    }))
}

/// Extract the stubs of an already located section.
pub fn extract_stubs(
    section: ElementRef<'_>,
    layout: &SectionLayout,
    base_url: &str,
) -> Result<Vec<ArticleStub>, Box<dyn Error>> {
    let mut stubs = Vec::new();

    if let Some(featured) = &layout.featured {
        if let Some(stub) = featured_stub(section, featured, base_url)? {
            stubs.push(stub);
        }
    }

    let rows = selector(layout.list_items)?;
    for (index, row) in section.select(&rows).enumerate() {
        match row_stub(row, base_url) {
            Some(stub) => stubs.push(stub),
            None => debug!(index, category = %layout.category, "Skipping list row without a link"),
        }
    }

    Ok(stubs)
}

/// Parse a homepage and extract the stubs of one section.
///
/// Returns `Ok(None)` when the section heading is not on the page.
#[instrument(level = "debug", skip(html, layout), fields(category = %layout.category))]
pub fn parse_section(
    html: &str,
    layout: &SectionLayout,
    base_url: &str,
) -> Result<Option<Vec<ArticleStub>>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    match locate_section(&document, layout.container, layout.heading)? {
        Some(section) => extract_stubs(section, layout, base_url).map(Some),
        None => Ok(None),
    }
}

/// The featured card, if it has a link, an image and a title.
fn featured_stub(
    section: ElementRef<'_>,
    featured: &FeaturedLayout,
    base_url: &str,
) -> Result<Option<ArticleStub>, Box<dyn Error>> {
    let scope = match featured.block {
        Some(css) => match section.select(&selector(css)?).next() {
            Some(block) => block,
            None => return Ok(None),
        },
        None => section,
    };

    let Some(anchor) = scope.select(&selector(featured.link)?).next() else {
        return Ok(None);
    };
    let Some(href) = anchor.value().attr("href") else {
        return Ok(None);
    };
    let Some(image) = anchor
        .select(&FEATURED_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
    else {
        debug!(%href, "Featured card has no image");
        return Ok(None);
    };
    let Some(title) = scope.select(&FEATURED_TITLE).next() else {
        debug!(%href, "Featured card has no title");
        return Ok(None);
    };

    let summary = featured
        .with_summary
        .then(|| scope.select(&PARAGRAPH).next().map(element_text));

    Ok(Some(ArticleStub {
        title: Some(element_text(title)),
        link: normalize_link(href, base_url),
        thumbnail: Some(image.to_string()),
        summary,
    }))
}

/// One list row; `None` when the row has no usable link.
fn row_stub(row: ElementRef<'_>, base_url: &str) -> Option<ArticleStub> {
    let anchor = row.select(&ROW_LINK).next()?;
    let href = anchor.value().attr("href")?;

    let title = anchor.select(&ROW_TITLE).next().map(element_text);
    let thumbnail = anchor
        .select(&ROW_THUMB)
        .next()
        .and_then(|div| div.value().attr("style"))
        .and_then(extract_image_from_style);

    Some(ArticleStub {
        title,
        link: normalize_link(href, base_url),
        thumbnail,
        summary: None,
    })
}

#[cfg(test)]
pub(crate) const HOMEPAGE: &str = include_str!("testdata/homepage.html");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    const BASE: &str = "https://www.azernews.az";

    fn stubs_for(category: Category) -> Vec<ArticleStub> {
        parse_section(HOMEPAGE, &SectionLayout::for_category(category), BASE)
            .unwrap()
            .expect("section present")
    }

    fn stub(
        title: Option<&str>,
        link: &str,
        thumbnail: Option<&str>,
        summary: Option<Option<&str>>,
    ) -> ArticleStub {
        ArticleStub {
            title: title.map(str::to_string),
            link: link.to_string(),
            thumbnail: thumbnail.map(str::to_string),
            summary: summary.map(|s| s.map(str::to_string)),
        }
    }

    #[test]
    fn test_locate_section_ignores_case_and_whitespace() {
        let doc = Html::parse_document(
            r#"<div class="col-12"><h2>Sport</h2></div><div class="col-12"><h2>  Nation  </h2><p>x</p></div>"#,
        );
        let section = locate_section(&doc, "div.col-12", "nation").unwrap().unwrap();
        assert_eq!(element_text(section.select(&PARAGRAPH).next().unwrap()), "x");
    }

    #[test]
    fn test_locate_section_requires_exact_heading() {
        let doc = Html::parse_document(r#"<div class="col-12"><h2>Nation news</h2></div>"#);
        assert!(locate_section(&doc, "div.col-12", "Nation").unwrap().is_none());
    }

    #[test]
    fn test_locate_section_respects_container() {
        // Half-width headings are invisible to a full-width lookup.
        let doc = Html::parse_document(HOMEPAGE);
        assert!(locate_section(&doc, "div.col-12", "World").unwrap().is_none());
        assert!(locate_section(&doc, "div.col-md-6", "World").unwrap().is_some());
    }

    #[test]
    fn test_missing_section_is_none() {
        let layout = SectionLayout::for_category(Category::World);
        let res = parse_section("<html><body></body></html>", &layout, BASE).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn test_world_featured_then_list() {
        assert_eq!(
            stubs_for(Category::World),
            vec![
                stub(Some("T1"), "https://www.azernews.az/world/250001.html", Some("I1"), Some(Some("S1"))),
                stub(
                    Some("T2"),
                    "https://www.azernews.az/world/250002.html",
                    Some("/media/world_2.jpg"),
                    None
                ),
            ]
        );
    }

    #[test]
    fn test_nation_block_layout() {
        let stubs = stubs_for(Category::Nation);
        assert_eq!(stubs.len(), 3);
        assert_eq!(
            stubs[0],
            stub(
                Some("President attends opening of Baku Energy Week"),
                "https://www.azernews.az/nation/240001.html",
                Some("https://www.azernews.az/media/2025/03/12/nation_main.jpg"),
                Some(Some("The event gathered delegations from 40 countries.")),
            )
        );
        assert_eq!(stubs[1].thumbnail.as_deref(), Some("https://www.azernews.az/media/nation_2.jpg"));
        // Absolute hrefs pass through; missing thumbnail style is not an error.
        assert_eq!(stubs[2].link, "https://www.azernews.az/nation/240003.html");
        assert_eq!(stubs[2].title.as_deref(), Some("Şəki hosts silk festival"));
        assert_eq!(stubs[2].thumbnail, None);
    }

    #[test]
    fn test_analysis_list_only_skips_rows_without_link() {
        let stubs = stubs_for(Category::Analysis);
        let links: Vec<_> = stubs.iter().map(|s| s.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://www.azernews.az/analysis/240101.html",
                "https://www.azernews.az/analysis/240102.html",
            ]
        );
        assert_eq!(stubs[1].title, None);
        assert!(stubs.iter().all(|s| s.summary.is_none()));
    }

    #[test]
    fn test_incomplete_featured_card_is_dropped() {
        let stubs = stubs_for(Category::Conflict);
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].title.as_deref(), Some("Demining work continues in liberated areas"));
    }

    #[test]
    fn test_culture_featured_without_paragraph_and_empty_list() {
        let stubs = stubs_for(Category::Culture);
        assert_eq!(
            stubs,
            vec![stub(
                Some("Mugham evening at the Philharmonic"),
                "https://www.azernews.az/culture/250101.html",
                Some("https://www.azernews.az/media/culture_main.jpg"),
                Some(None),
            )]
        );
    }

    #[test]
    fn test_aggression_featured_has_no_summary() {
        let stubs = stubs_for(Category::ArmenianAggression);
        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title.as_deref(), Some("Memorial held for Khojaly victims"));
        assert_eq!(stubs[0].summary, None);
        assert_eq!(stubs[1].thumbnail, None);
    }

    #[test]
    fn test_featured_anchor_needs_exact_class() {
        let html = r#"<div class="col-md-6"><h2>World</h2>
            <a class="news-item mb-3 promo" href="/world/9.html"><img src="/ad.jpg"></a>
            <h3>Sponsored</h3><ul class="list-unstyled"></ul></div>"#;
        let layout = SectionLayout::for_category(Category::World);
        assert_eq!(parse_section(html, &layout, BASE).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_empty_section_yields_empty_list() {
        let html = r#"<div class="col-md-6"><h2>World</h2><ul class="list-unstyled"></ul></div>"#;
        let layout = SectionLayout::for_category(Category::World);
        assert_eq!(parse_section(html, &layout, BASE).unwrap(), Some(vec![]));
    }
}
