use serde::Deserialize;

/// Main configuration structure for sitesweep
///
/// Every section has sensible defaults, so running without a config file
/// is fully supported.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout applied to each individual page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum number of concurrent page fetches within one depth level
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,

    /// Minimum character count a paragraph must exceed to be extracted
    #[serde(rename = "min-paragraph-chars")]
    pub min_paragraph_chars: usize,

    /// Whether discovered links on other hosts are followed
    ///
    /// Links are always recorded in page records; this only controls
    /// whether the crawl visits them.
    #[serde(rename = "follow-external-links")]
    pub follow_external_links: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
            max_concurrent_fetches: 8,
            min_paragraph_chars: 20,
            follow_external_links: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "sitesweep".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where crawl report JSON files are written
    #[serde(rename = "report-dir")]
    pub report_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: ".".to_string(),
        }
    }
}
