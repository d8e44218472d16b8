use crate::config::types::AppConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitesweep::config::load_config;
///
/// let config = load_config(Path::new("sitesweep.toml")).unwrap();
/// println!("Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}
