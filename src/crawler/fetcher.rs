//! HTTP fetcher implementation
//!
//! One fetch is exactly one network retrieval: no retries, no shared state.
//! Failures are classified into the three kinds the orchestrator cares
//! about (non-success status, timeout, network error) so it can record and
//! skip them without aborting the crawl.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a single fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successfully fetched the page body
    Success {
        /// Final URL after any redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Raw markup
        body: String,
    },

    /// Server answered with a non-success HTTP status
    HttpStatus { status_code: u16 },

    /// The request exceeded its deadline
    TimedOut,

    /// Connection-level failure (refused, DNS, TLS, reset)
    Network { error: String },
}

impl FetchOutcome {
    /// Short description of a failed outcome, None for Success
    pub fn failure(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpStatus { status_code } => Some(format!("HTTP {}", status_code)),
            Self::TimedOut => Some("request timed out".to_string()),
            Self::Network { error } => Some(error.clone()),
        }
    }
}

/// Builds the HTTP client shared by all fetches of a crawl
///
/// The per-request deadline is passed to [`fetch_url`] instead of being
/// baked into the client, so one client serves crawls with different
/// timeout settings.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.crawler_name, config.crawler_version);

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once, classifying any failure
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Deadline for the whole request, including body download
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchOutcome {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            return if e.is_timeout() {
                FetchOutcome::TimedOut
            } else if e.is_connect() {
                FetchOutcome::Network {
                    error: format!("connection failed: {}", e),
                }
            } else {
                FetchOutcome::Network {
                    error: e.to_string(),
                }
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpStatus {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) if e.is_timeout() => FetchOutcome::TimedOut,
        Err(e) => FetchOutcome::Network {
            error: e.to_string(),
        },
    }
}
