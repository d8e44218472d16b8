//! Crawl orchestration
//!
//! The orchestrator drives one crawl end to end: it validates the request,
//! seeds the frontier, fetches each depth level with bounded concurrency,
//! extracts a record per successful fetch, and assembles the final report.
//!
//! A failed page fetch is logged and skipped; it never aborts the crawl.
//! The crawl as a whole fails only when the request is invalid or the seed
//! URL itself cannot be fetched.

use crate::config::AppConfig;
use crate::crawler::extractor::{extract_page, ExtractOptions};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::frontier::Frontier;
use crate::crawler::report::{CrawlReport, CrawlSummary, PageRecord};
use crate::crawler::request::CrawlRequest;
use crate::SweepError;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Drives crawls against a shared HTTP client
///
/// One orchestrator serves any number of crawls; each `run` call keeps its
/// own frontier and report, so concurrent runs share nothing but the
/// client's connection pool.
pub struct Orchestrator {
    config: Arc<AppConfig>,
    client: Client,
}

impl Orchestrator {
    /// Creates an orchestrator, building the HTTP client from the config
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SweepError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self { config, client })
    }

    /// Runs one complete crawl and returns the aggregate report
    ///
    /// Levels are fetched breadth-first: all fetches of a level finish,
    /// successfully or not, before the frontier derives the next level
    /// from the level's extracted links. Pages appear in the report in
    /// the order their fetches completed.
    pub async fn run(&self, request: &CrawlRequest) -> Result<CrawlReport, SweepError> {
        let base = request.validate()?;
        let started = Instant::now();

        let options = ExtractOptions {
            include_links: request.include_links,
            include_images: request.include_images,
            min_paragraph_chars: self.config.crawler.min_paragraph_chars,
        };

        let mut frontier = Frontier::new(
            base.clone(),
            request.depth as u32,
            request.max_pages as usize,
            self.config.crawler.follow_external_links,
        );

        let mut pages: Vec<PageRecord> = Vec::new();
        let mut failed_fetches = 0usize;
        let mut depth = 0u32;
        let mut level = frontier.seed();

        while !level.is_empty() {
            tracing::info!(depth, urls = level.len(), "fetching level");

            let outcomes = self.fetch_level(&level, &options).await;

            let mut records = Vec::with_capacity(outcomes.len());
            let mut seed_failure = None;

            for outcome in outcomes {
                match outcome {
                    Ok(record) => records.push(record),
                    Err((url, reason)) => {
                        failed_fetches += 1;
                        tracing::warn!(url = %url, %reason, "page fetch failed, skipping");
                        if depth == 0 {
                            seed_failure = Some(reason);
                        }
                    }
                }
            }

            if depth == 0 && records.is_empty() {
                let reason = seed_failure.unwrap_or_else(|| "no response".to_string());
                return Err(SweepError::Crawl(format!(
                    "seed URL {} could not be fetched: {}",
                    base, reason
                )));
            }

            if records.is_empty() {
                tracing::info!(depth, "level produced no pages, stopping crawl");
                break;
            }

            level = frontier.next_level(&records);
            pages.append(&mut records);
            depth += 1;
        }

        let total_time = started.elapsed().as_secs_f64();

        tracing::info!(
            pages = pages.len(),
            failed = failed_fetches,
            elapsed_secs = total_time,
            "crawl finished"
        );

        let summary = CrawlSummary::from_pages(&pages);

        Ok(CrawlReport {
            base_url: request.url.clone(),
            pages_scraped: pages.len(),
            total_time,
            depth: request.depth as u32,
            max_pages: request.max_pages as usize,
            pages,
            summary,
        })
    }

    /// Fetches every URL of one level concurrently and extracts records
    ///
    /// Concurrency is bounded by the configured limit. Results arrive in
    /// completion order; a failed fetch yields the URL and a reason so the
    /// caller can tally it.
    async fn fetch_level(
        &self,
        urls: &[Url],
        options: &ExtractOptions,
    ) -> Vec<Result<PageRecord, (Url, String)>> {
        let timeout = Duration::from_secs(self.config.crawler.fetch_timeout_secs);
        let limit = self.config.crawler.max_concurrent_fetches.max(1);

        stream::iter(urls.iter().cloned().map(|url| {
            let client = self.client.clone();
            let options = options.clone();
            async move {
                match fetch_url(&client, url.as_str(), timeout).await {
                    FetchOutcome::Success { body, .. } => Ok(extract_page(&body, &url, &options)),
                    failure => {
                        let reason = failure
                            .failure()
                            .unwrap_or_else(|| "unknown error".to_string());
                        Err((url, reason))
                    }
                }
            }
        }))
        .buffer_unordered(limit)
        .collect()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_orchestrator_builds_with_default_config() {
        let config = Arc::new(AppConfig::default());
        assert!(Orchestrator::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_any_fetch() {
        let orchestrator = Orchestrator::new(Arc::new(AppConfig::default())).unwrap();
        let mut request = CrawlRequest::new("https://example.com");
        request.depth = -1;

        let err = orchestrator.run(&request).await.unwrap_err();
        assert!(matches!(err, SweepError::Validation(_)));
    }

    // End-to-end crawls are covered by the wiremock tests in tests/.
}
