//! Content extraction from page markup
//!
//! Extraction is a pure transformation from raw markup to a [`PageRecord`]:
//! the same markup and source URL always produce the same fields. The
//! underlying parser is error-recovering, so markup that cannot be made
//! sense of degrades to a record with empty fields instead of an error.

use crate::crawler::report::{PageImage, PageLink, PageRecord};
use chrono::Utc;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

/// Knobs controlling what the extractor collects
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Collect hyperlinks into the record
    pub include_links: bool,

    /// Collect images into the record
    pub include_images: bool,

    /// Paragraphs must exceed this many characters to be kept
    pub min_paragraph_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_links: true,
            include_images: false,
            min_paragraph_chars: 20,
        }
    }
}

/// Extracts a structured page record from raw markup
///
/// Link and image targets are resolved to absolute form against
/// `source_url`. The record's counts always equal the length of the
/// corresponding sequences, and `content_length` is the byte length of the
/// extracted text (title, headings, paragraphs), not the markup size.
pub fn extract_page(html: &str, source_url: &Url, options: &ExtractOptions) -> PageRecord {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let headings = extract_headings(&document);
    let paragraphs = extract_paragraphs(&document, options.min_paragraph_chars);

    let links = if options.include_links {
        extract_links(&document, source_url)
    } else {
        Vec::new()
    };

    let images = if options.include_images {
        extract_images(&document, source_url)
    } else {
        Vec::new()
    };

    let meta = extract_meta(&document);

    let content_length = title.len()
        + headings.iter().map(String::len).sum::<usize>()
        + paragraphs.iter().map(String::len).sum::<usize>();

    PageRecord {
        url: source_url.to_string(),
        title,
        headings_count: headings.len(),
        paragraphs_count: paragraphs.len(),
        links_count: links.len(),
        images_count: images.len(),
        headings,
        paragraphs,
        links,
        images,
        meta,
        content_length,
        scraped_at: Utc::now(),
    }
}

/// Extracts the page title, empty when the document has none
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| collect_text(&element))
        .unwrap_or_default()
}

/// Extracts heading text for levels 1 through 6, in document order
fn extract_headings(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| collect_text(&element))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Extracts paragraph text longer than the threshold
///
/// Short paragraphs are dropped silently; this is a noise filter for menu
/// fragments and captions, not an error.
fn extract_paragraphs(document: &Html, min_chars: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| collect_text(&element))
        .filter(|text| text.chars().count() > min_chars)
        .collect()
}

/// Extracts hyperlinks with targets resolved against the source URL
fn extract_links(document: &Html, base_url: &Url) -> Vec<PageLink> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(absolute) = resolve_link(href, base_url) {
            links.push(PageLink {
                href: absolute,
                text: collect_text(&element),
            });
        }
    }
    links
}

/// Extracts images with sources resolved against the source URL
fn extract_images(document: &Html, base_url: &Url) -> Vec<PageImage> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    let mut images = Vec::new();
    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let Ok(absolute) = base_url.join(src.trim()) else {
            continue;
        };
        images.push(PageImage {
            src: absolute.to_string(),
            alt: element.value().attr("alt").unwrap_or("").trim().to_string(),
            title: element
                .value()
                .attr("title")
                .unwrap_or("")
                .trim()
                .to_string(),
        });
    }
    images
}

/// Extracts meta tags into a name-to-content mapping
///
/// The key is the tag's `name` attribute, falling back to `property`.
/// On key collision the last occurrence wins.
fn extract_meta(document: &Html) -> BTreeMap<String, String> {
    let Ok(selector) = Selector::parse("meta") else {
        return BTreeMap::new();
    };

    let mut meta = BTreeMap::new();
    for element in document.select(&selector) {
        let name = element
            .value()
            .attr("name")
            .or_else(|| element.value().attr("property"));
        let content = element.value().attr("content");
        if let (Some(name), Some(content)) = (name, content) {
            meta.insert(name.to_string(), content.to_string());
        }
    }
    meta
}

/// Concatenates and trims the text nodes under an element
fn collect_text(element: &scraper::ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolves a link href to an absolute URL
///
/// Returns None for non-navigational targets:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only links (same page anchors)
/// - anything that does not resolve to HTTP(S)
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
