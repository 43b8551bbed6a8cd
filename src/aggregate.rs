use std::collections::HashSet;

use crate::job::JobPosting;
use crate::sources::JobSource;

/// Runs every source in order and merges their postings, first URL wins.
pub struct Aggregator {
    sources: Vec<Box<dyn JobSource>>,
    keywords: Vec<String>,
    max_results: usize,
}

impl Aggregator {
    pub fn new(sources: Vec<Box<dyn JobSource>>, keywords: Vec<String>, max_results: usize) -> Self {
        Self {
            sources,
            keywords,
            max_results,
        }
    }

    pub fn collect(&self) -> Vec<JobPosting> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for source in &self.sources {
            if unique.len() >= self.max_results {
                break;
            }
            let postings = match source.fetch(&self.keywords, self.max_results) {
                Ok(postings) => postings,
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "scrape failed");
                    continue;
                }
            };
            tracing::debug!(source = source.name(), count = postings.len(), "scraped");

            for posting in postings {
                if unique.len() >= self.max_results {
                    break;
                }
                if seen.insert(posting.url.clone()) {
                    unique.push(posting);
                }
            }
        }

        tracing::info!(count = unique.len(), "unique jobs found");
        unique
    }
}
