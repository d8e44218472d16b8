//! Sitesweep: a bounded breadth-first web crawler
//!
//! This crate crawls a starting URL to a configurable depth and page count,
//! extracts structured content (title, headings, paragraphs, links, images,
//! meta tags) from every fetched page, and aggregates the results into a
//! single crawl report. Crawls run as asynchronous tasks that callers poll
//! for status and results.

pub mod config;
pub mod crawler;
pub mod output;
pub mod task;
pub mod url;

use thiserror::Error;
use uuid::Uuid;

/// Main error type for sitesweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid crawl request: {0}")]
    Validation(String),

    #[error("Crawl failed: {0}")]
    Crawl(String),

    #[error("No task with id {0}")]
    TaskNotFound(Uuid),

    #[error("Task {0} has not finished yet")]
    ResultNotReady(Uuid),

    #[error("Task {id} failed: {message}")]
    TaskFailed { id: Uuid, message: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitesweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::AppConfig;
pub use crawler::{CrawlReport, CrawlRequest, Orchestrator, PageRecord};
pub use task::{TaskManager, TaskStatus};
