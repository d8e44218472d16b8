//! Crawl result data model
//!
//! A [`PageRecord`] is the structured extraction result for one fetched
//! page; a [`CrawlReport`] aggregates every record produced by a crawl
//! together with summary totals. Both are created once and never mutated
//! afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A hyperlink discovered on a page, with its resolved absolute target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: String,
    pub text: String,
}

/// An image discovered on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// The structured extraction result for one fetched page
///
/// Counts always equal the length of the corresponding sequence, and
/// `content_length` measures the extracted text (title, headings,
/// paragraphs), not the raw markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical URL of the page, used as its identity within a crawl
    pub url: String,
    /// Text of the title element, empty when the document has none
    pub title: String,
    /// Heading text (levels 1 through 6) in document order
    pub headings: Vec<String>,
    /// Paragraph text exceeding the minimum-length threshold, in order
    pub paragraphs: Vec<String>,
    /// Hyperlinks with absolute targets, empty when link extraction is off
    pub links: Vec<PageLink>,
    /// Images, empty when image extraction is off
    pub images: Vec<PageImage>,
    /// Meta tag name/property to content, last occurrence wins
    pub meta: BTreeMap<String, String>,
    /// Byte length of the extracted text
    pub content_length: usize,
    pub headings_count: usize,
    pub paragraphs_count: usize,
    pub links_count: usize,
    pub images_count: usize,
    /// When the fetch of this page completed
    pub scraped_at: DateTime<Utc>,
}

/// Aggregated totals across every page in a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub total_headings: usize,
    pub total_paragraphs: usize,
    pub total_links: usize,
    pub total_images: usize,
    pub total_content_length: usize,
}

impl CrawlSummary {
    /// Sums the per-page counts across the given records
    pub fn from_pages(pages: &[PageRecord]) -> Self {
        Self {
            total_headings: pages.iter().map(|p| p.headings_count).sum(),
            total_paragraphs: pages.iter().map(|p| p.paragraphs_count).sum(),
            total_links: pages.iter().map(|p| p.links_count).sum(),
            total_images: pages.iter().map(|p| p.images_count).sum(),
            total_content_length: pages.iter().map(|p| p.content_length).sum(),
        }
    }
}

/// The aggregate result of one complete crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// The URL the crawl was requested for, as submitted
    pub base_url: String,
    /// Number of successfully fetched pages, equal to `pages.len()`
    pub pages_scraped: usize,
    /// Elapsed wall-clock time in seconds
    pub total_time: f64,
    pub depth: u32,
    pub max_pages: usize,
    /// Page records in the order their fetches completed
    pub pages: Vec<PageRecord>,
    pub summary: CrawlSummary,
}
