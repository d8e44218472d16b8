//! Sitesweep main entry point
//!
//! The CLI plays the role of an external caller: it submits the crawl to
//! the task manager, polls for completion, then prints a summary and
//! writes the report JSON.

use anyhow::Context;
use clap::Parser;
use sitesweep::config::{load_config, AppConfig};
use sitesweep::crawler::{CrawlReport, CrawlRequest};
use sitesweep::output::write_report;
use sitesweep::task::TaskManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sitesweep: a bounded breadth-first web crawler
#[derive(Parser, Debug)]
#[command(name = "sitesweep")]
#[command(version)]
#[command(about = "Crawl a site to a bounded depth and extract structured content", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// How many link hops past the base URL to follow
    #[arg(long, default_value_t = 1)]
    depth: i32,

    /// Upper bound on the total number of fetched pages
    #[arg(long = "max-pages", default_value_t = 10)]
    max_pages: i32,

    /// Extract images into page records
    #[arg(long)]
    include_images: bool,

    /// Skip hyperlink extraction (this also stops link discovery)
    #[arg(long)]
    skip_links: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Do not write the report JSON file
    #[arg(long)]
    no_save: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let config = Arc::new(config);

    let request = CrawlRequest {
        url: cli.url.clone(),
        depth: cli.depth,
        max_pages: cli.max_pages,
        include_images: cli.include_images,
        include_links: !cli.skip_links,
    };

    let manager = TaskManager::new(Arc::clone(&config))?;
    let task_id = manager.submit(request).await?;
    tracing::info!(%task_id, "crawl submitted");

    // Poll until the task reaches a terminal state
    loop {
        let status = manager.get_status(task_id).await?;
        if status.status.is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    let report = manager.get_result(task_id).await?;
    print_summary(&report);

    if !cli.no_save {
        let path = write_report(&report, Path::new(&config.output.report_dir))?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesweep=info,warn"),
            1 => EnvFilter::new("sitesweep=debug,info"),
            2 => EnvFilter::new("sitesweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints a human-readable summary of the finished crawl
fn print_summary(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");
    println!("Base URL: {}", report.base_url);
    println!("Pages scraped: {}", report.pages_scraped);
    println!("Total time: {:.2}s", report.total_time);
    println!("Depth: {}", report.depth);
    println!("Max pages: {}", report.max_pages);

    println!("\nContent totals:");
    println!("  Headings: {}", report.summary.total_headings);
    println!("  Paragraphs: {}", report.summary.total_paragraphs);
    println!("  Links: {}", report.summary.total_links);
    println!("  Images: {}", report.summary.total_images);
    println!("  Content length: {}", report.summary.total_content_length);

    if let Some(first) = report.pages.first() {
        println!("\nFirst page:");
        println!("  URL: {}", first.url);
        println!("  Title: {}", first.title);
        println!(
            "  Headings: {}, paragraphs: {}, links: {}, images: {}",
            first.headings_count, first.paragraphs_count, first.links_count, first.images_count
        );
    }
}
