//! JSON report files
//!
//! Writes a finished crawl report to disk for interchange with other
//! tools, using the report's serialized field names as-is.

use crate::crawler::CrawlReport;
use crate::SweepError;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Writes the report as pretty-printed JSON into the given directory
///
/// The file is named `crawl_<timestamp>.json`. Returns the path written.
pub fn write_report(report: &CrawlReport, dir: &Path) -> Result<PathBuf, SweepError> {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("crawl_{}.json", timestamp));
    write_report_to(report, &path)?;
    Ok(path)
}

/// Writes the report as pretty-printed JSON to an exact path
pub fn write_report_to(report: &CrawlReport, path: &Path) -> Result<(), SweepError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "crawl report written");
    Ok(())
}
