//! Per-category homepage layouts.
//!
//! The six homepage sections share one extraction routine; what differs is
//! captured here as data. Two container classes are in use on the site
//! (`div.col-12` for full-width blocks, `div.col-md-6` for half-width
//! columns) and the featured article is marked up differently in each.

use crate::models::Category;

const FULL_WIDTH: &str = "div.col-12";
const HALF_WIDTH: &str = "div.col-md-6";
const NESTED_LIST_ITEMS: &str = "div.col-md-6 ul.list-unstyled li";
const LIST_ITEMS: &str = "ul.list-unstyled li";
// Featured anchors match on the whole class attribute; extra classes mean
// some other card.
const LARGE_CARD: &str = r#"a[class="news-item large"]"#;
const SPACED_CARD: &str = r#"a[class="news-item mb-3"]"#;

/// Where a section's featured article lives and what it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedLayout {
    /// Sub-block holding the featured card. Title and summary are looked up
    /// inside it; when `None` they are looked up in the whole section.
    pub block: Option<&'static str>,
    /// Anchor of the featured card, searched within `block` (or the section).
    pub link: &'static str,
    /// Whether the first paragraph is emitted as `summary`.
    pub with_summary: bool,
}

/// Everything the generic extractor needs to know about one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub category: Category,
    /// Candidate containers scanned for the section heading.
    pub container: &'static str,
    /// Expected `h2` text, compared case-insensitively after trimming.
    pub heading: &'static str,
    pub featured: Option<FeaturedLayout>,
    /// List rows, in document order.
    pub list_items: &'static str,
}

impl SectionLayout {
    /// The layout for `category`.
    pub fn for_category(category: Category) -> Self {
        let heading = category.heading();
        match category {
            Category::Nation | Category::Conflict => Self {
                category,
                container: FULL_WIDTH,
                heading,
                featured: Some(FeaturedLayout {
                    block: Some("div.index-block-custom"),
                    link: LARGE_CARD,
                    with_summary: true,
                }),
                list_items: NESTED_LIST_ITEMS,
            },
            Category::Analysis => Self {
                category,
                container: FULL_WIDTH,
                heading,
                featured: None,
                list_items: NESTED_LIST_ITEMS,
            },
            Category::World | Category::Culture | Category::ArmenianAggression => Self {
                category,
                container: HALF_WIDTH,
                heading,
                featured: Some(FeaturedLayout {
                    block: None,
                    link: SPACED_CARD,
                    with_summary: category != Category::ArmenianAggression,
                }),
                list_items: LIST_ITEMS,
            },
        }
    }
}
