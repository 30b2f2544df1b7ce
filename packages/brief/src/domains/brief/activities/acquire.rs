//! Source acquisition activity
//!
//! Pipeline:
//! 1. Run every topic query against the search provider
//! 2. Merge results in query order
//! 3. Deduplicate by normalized URL and by (host, normalized title)
//! 4. Optionally drop unreachable links
//! 5. Cap the list

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::common::utils::{host_key, normalize_title, url_key};
use crate::domains::brief::models::{Acquisition, BriefType, SourceRecord};
use crate::kernel::{BaseLinkChecker, BriefDeps};

/// Most sources handed to synthesis.
pub const MAX_SOURCES: usize = 20;

/// Fixed topic queries, in priority order.
pub const TOPIC_QUERIES: &[&str] = &[
    "Workday AI roadmap announcement",
    "Workday HCM AI agents",
    "Workday Illuminate generative AI",
    "agentic AI HR technology",
    "Workday partner systems integrator AI practice",
    "Workday consultant upskilling AI skills",
];

/// Gather candidate sources for a run.
pub async fn gather_sources(
    brief_type: BriefType,
    max_results: usize,
    deps: &BriefDeps,
) -> Acquisition {
    if !deps.search.is_configured() {
        info!("No search provider configured; continuing without sources");
        return Acquisition::Unavailable;
    }

    let days = brief_type.recency_days();
    let mut merged = Vec::new();
    let mut failures = 0;

    for query in TOPIC_QUERIES {
        match deps.search.search(query, max_results, days).await {
            Ok(results) => {
                debug!(query, results_count = results.len(), "Search returned results");
                merged.extend(results.into_iter().map(SourceRecord::from));
            }
            Err(e) => {
                warn!(query, error = %e, "Search failed, skipping");
                failures += 1;
            }
        }
    }

    if failures == TOPIC_QUERIES.len() {
        warn!("Every search query failed; continuing without sources");
        return Acquisition::Unavailable;
    }

    let mut sources = dedupe_sources(merged);
    if let Some(checker) = &deps.link_checker {
        sources = filter_reachable(sources, checker.as_ref()).await;
    }
    sources.truncate(MAX_SOURCES);

    info!(brief_type = %brief_type, sources = sources.len(), "Acquisition complete");
    if sources.is_empty() {
        Acquisition::NoResults
    } else {
        Acquisition::Sources(sources)
    }
}

/// Drop records without a web URL, then duplicates by URL key and by
/// (host, title). The first occurrence wins.
pub fn dedupe_sources(records: Vec<SourceRecord>) -> Vec<SourceRecord> {
    let mut seen_urls = HashSet::new();
    let mut seen_titles = HashSet::new();

    records
        .into_iter()
        .filter(|record| {
            let Some(host) = host_key(&record.url) else {
                debug!(url = %record.url, "Dropping source without a host");
                return false;
            };
            if !seen_urls.insert(url_key(&record.url)) {
                return false;
            }
            let title = normalize_title(&record.title);
            title.is_empty() || seen_titles.insert((host, title))
        })
        .collect()
}

async fn filter_reachable(
    sources: Vec<SourceRecord>,
    checker: &dyn BaseLinkChecker,
) -> Vec<SourceRecord> {
    let mut kept = Vec::with_capacity(sources.len());
    for source in sources {
        if checker.is_reachable(&source.url).await {
            kept.push(source);
        } else {
            info!(url = %source.url, "Dropping unreachable source");
        }
    }
    kept
}
