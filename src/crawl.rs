//! Structural lookups on the listing and detail pages.
//!
//! Any expected element that is missing is a `ParseError`; nothing is skipped.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::util::normalize_whitespace;

const ITEM: &str = "main article.post-uttalelser";
const LINK: &str = "a";
const FOOTER: &str = ".post-meta p";
const TITLE: &str = "h1";
const DESCRIPTION: &str = ".list-item__desc";
const PAGINATION: &str = ".pagination li";
const ARTICLE: &str = "article";

/// Pagination entry that links forward rather than naming a page.
const NEXT_LABEL: &str = "Neste";

static ITEM_SEL: LazyLock<Selector> = LazyLock::new(|| selector(ITEM));
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector(LINK));
static FOOTER_SEL: LazyLock<Selector> = LazyLock::new(|| selector(FOOTER));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(TITLE));
static DESCRIPTION_SEL: LazyLock<Selector> = LazyLock::new(|| selector(DESCRIPTION));
static PAGINATION_SEL: LazyLock<Selector> = LazyLock::new(|| selector(PAGINATION));
static ARTICLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(ARTICLE));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// One opinion as listed on an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub url: String,
    pub footer_lines: Vec<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub entries: Vec<ListingEntry>,
    /// Last page number from the pagination control; 1 without pagination.
    pub page_count: usize,
}

pub fn parse_listing(html: &str) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);

    let entries = document
        .select(&ITEM_SEL)
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let page_count = match document
        .select(&PAGINATION_SEL)
        .map(element_text)
        .filter(|label| label != NEXT_LABEL)
        .last()
    {
        Some(label) => label
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidPageCount { value: label })?,
        None => 1,
    };

    Ok(ListingPage {
        entries,
        page_count,
    })
}

/// Full opinion text from a detail page.
pub fn parse_detail(html: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(html);
    document
        .select(&ARTICLE_SEL)
        .next()
        .map(element_text)
        .ok_or_else(|| ParseError::MissingElement {
            selector: ARTICLE,
            context: "detail page".to_string(),
        })
}

fn parse_entry(index: usize, item: ElementRef<'_>) -> Result<ListingEntry, ParseError> {
    let context = || format!("listing item #{index}");
    let missing = |selector| ParseError::MissingElement {
        selector,
        context: context(),
    };

    let url = item
        .select(&LINK_SEL)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(ToOwned::to_owned)
        .ok_or_else(|| missing(LINK))?;

    let footer_lines: Vec<String> = item.select(&FOOTER_SEL).map(element_text).collect();
    if footer_lines.is_empty() {
        return Err(missing(FOOTER));
    }

    let title = item
        .select(&TITLE_SEL)
        .next()
        .map(element_text)
        .ok_or_else(|| missing(TITLE))?;
    let description = item
        .select(&DESCRIPTION_SEL)
        .next()
        .map(element_text)
        .ok_or_else(|| missing(DESCRIPTION))?;

    Ok(ListingEntry {
        url,
        footer_lines,
        title,
        description,
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
