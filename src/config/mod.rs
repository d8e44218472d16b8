//! Configuration loading and validation
//!
//! Configuration is read from an optional TOML file with kebab-case keys;
//! every value has a default so the crawler runs unconfigured.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{AppConfig, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
