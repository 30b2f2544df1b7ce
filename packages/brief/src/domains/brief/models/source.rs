use serde::{Deserialize, Serialize};

use crate::kernel::SearchResult;

/// One candidate source handed to synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub published_date: Option<String>,
}

impl From<SearchResult> for SourceRecord {
    fn from(result: SearchResult) -> Self {
        Self {
            title: result.title.trim().to_string(),
            url: result.url.trim().to_string(),
            snippet: result.content.trim().to_string(),
            published_date: result.published_date,
        }
    }
}

/// Outcome of source acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// Deduplicated sources in query order.
    Sources(Vec<SourceRecord>),
    /// The search ran but nothing survived filtering.
    NoResults,
    /// No provider configured, or every query failed.
    Unavailable,
}

impl Acquisition {
    pub fn sources(&self) -> &[SourceRecord] {
        match self {
            Acquisition::Sources(sources) => sources,
            _ => &[],
        }
    }
}
