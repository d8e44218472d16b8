//! Crawler module: request, fetch, extract, frontier, orchestration
//!
//! The pieces compose as a pipeline per depth level: the [`Frontier`]
//! yields a batch of URLs, [`fetch_url`] retrieves each one concurrently,
//! [`extract_page`] turns each body into a [`PageRecord`], and the
//! [`Orchestrator`] folds the records into the final [`CrawlReport`].

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod report;
mod request;

pub use coordinator::Orchestrator;
pub use extractor::{extract_page, ExtractOptions};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use frontier::Frontier;
pub use report::{CrawlReport, CrawlSummary, PageImage, PageLink, PageRecord};
pub use request::CrawlRequest;
