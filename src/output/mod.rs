//! Crawl report output

mod json;

pub use json::{write_report, write_report_to};
