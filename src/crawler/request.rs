//! Crawl request parameters and validation

use crate::url::normalize_url;
use crate::SweepError;
use serde::{Deserialize, Serialize};
use url::Url;

fn default_depth() -> i32 {
    1
}

fn default_max_pages() -> i32 {
    10
}

fn default_include_links() -> bool {
    true
}

/// Parameters for one crawl, immutable once the crawl starts
///
/// Depth and page count are plain integers rather than unsigned types so
/// that out-of-range values arriving from external callers surface as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    /// Absolute URL the crawl starts from
    pub url: String,

    /// How many link hops past the base URL to follow, 0 for seed only
    #[serde(default = "default_depth")]
    pub depth: i32,

    /// Upper bound on the total number of fetched pages
    #[serde(default = "default_max_pages")]
    pub max_pages: i32,

    /// Whether image elements are extracted into page records
    #[serde(default)]
    pub include_images: bool,

    /// Whether hyperlinks are extracted into page records
    #[serde(default = "default_include_links")]
    pub include_links: bool,
}

impl CrawlRequest {
    /// Creates a request for the given URL with default limits
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: default_depth(),
            max_pages: default_max_pages(),
            include_images: false,
            include_links: default_include_links(),
        }
    }

    /// Validates the request and returns the normalized base URL
    ///
    /// Fails when the URL is not a well-formed absolute HTTP(S) URL, when
    /// depth is negative, or when max_pages is below one.
    pub fn validate(&self) -> Result<Url, SweepError> {
        if self.depth < 0 {
            return Err(SweepError::Validation(format!(
                "depth must be >= 0, got {}",
                self.depth
            )));
        }

        if self.max_pages < 1 {
            return Err(SweepError::Validation(format!(
                "max_pages must be >= 1, got {}",
                self.max_pages
            )));
        }

        normalize_url(&self.url)
            .map_err(|e| SweepError::Validation(format!("invalid base URL '{}': {}", self.url, e)))
    }
}
