//! Crawl frontier with dedup and budget tracking
//!
//! The frontier hands the orchestrator one batch of URLs per depth level.
//! It owns the seen-set, the total page budget, and the depth bound, so
//! the bounds are enforced structurally: a URL that has been emitted once
//! is never emitted again, and no batch extends past the budget.
//!
//! Only the orchestrator driving a crawl touches its frontier, and only
//! between levels, so no synchronization is needed even though the fetches
//! themselves run concurrently.

use crate::crawler::report::PageRecord;
use crate::url::{normalize_url, same_site};
use std::collections::HashSet;
use url::Url;

pub struct Frontier {
    base: Url,
    max_depth: u32,
    max_pages: usize,
    follow_external: bool,

    /// Normalized URLs already emitted in this crawl
    seen: HashSet<String>,
    /// Total URLs emitted across all levels, seed included
    emitted: usize,
    /// Depth of the most recently issued level
    current_depth: u32,
}

impl Frontier {
    pub fn new(base: Url, max_depth: u32, max_pages: usize, follow_external: bool) -> Self {
        Self {
            base,
            max_depth,
            max_pages,
            follow_external,
            seen: HashSet::new(),
            emitted: 0,
            current_depth: 0,
        }
    }

    /// Initializes level 0 with the single base URL
    pub fn seed(&mut self) -> Vec<Url> {
        self.seen.insert(self.base.as_str().to_string());
        self.emitted = 1;
        self.current_depth = 0;
        vec![self.base.clone()]
    }

    /// Derives the next level's batch from the current level's records
    ///
    /// Links are considered in the order they appear on each page; when the
    /// remaining budget truncates the batch, earlier-discovered links are
    /// kept. Returns an empty batch when the depth bound is reached, the
    /// budget is spent, or no new links were discovered. An empty batch
    /// terminates the crawl.
    pub fn next_level(&mut self, fetched: &[PageRecord]) -> Vec<Url> {
        if self.current_depth >= self.max_depth {
            return Vec::new();
        }

        let mut next = Vec::new();

        'records: for record in fetched {
            for link in &record.links {
                if self.emitted >= self.max_pages {
                    break 'records;
                }

                let url = match normalize_url(&link.href) {
                    Ok(url) => url,
                    Err(_) => continue,
                };

                if !self.follow_external && !same_site(&url, &self.base) {
                    continue;
                }

                // insert returns false when the URL was already seen
                if !self.seen.insert(url.as_str().to_string()) {
                    continue;
                }

                next.push(url);
                self.emitted += 1;
            }
        }

        if !next.is_empty() {
            self.current_depth += 1;
        }

        next
    }
}
