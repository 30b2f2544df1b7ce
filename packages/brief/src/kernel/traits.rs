// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to search for, what to prompt, and what to publish lives in
// domains/brief/activities.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseMailer)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Search Trait (Infrastructure - news search provider)
// =============================================================================

/// One result from the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
    pub published_date: Option<String>,
}

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Search recent news. `days` bounds how far back results may go.
    async fn search(&self, query: &str, max_results: usize, days: u32) -> Result<Vec<SearchResult>>;

    /// False for stand-ins that have no provider behind them.
    fn is_configured(&self) -> bool {
        true
    }
}

// =============================================================================
// AI Trait (Infrastructure - JSON completions)
// =============================================================================

/// Which provider endpoint an attempt goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    Responses,
    ChatCompletions,
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallShape::Responses => f.write_str("responses"),
            CallShape::ChatCompletions => f.write_str("chat_completions"),
        }
    }
}

/// One step of the synthesis fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisAttempt {
    pub model: String,
    pub shape: CallShape,
}

impl SynthesisAttempt {
    pub fn new(model: impl Into<String>, shape: CallShape) -> Self {
        Self {
            model: model.into(),
            shape,
        }
    }
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Ask for a single JSON object. Returns the raw reply text; parse it in
    /// calling code.
    async fn complete_json(
        &self,
        attempt: &SynthesisAttempt,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String>;
}

// =============================================================================
// Link Checker Trait
// =============================================================================

#[async_trait]
pub trait BaseLinkChecker: Send + Sync {
    /// True when the URL answers with a 2xx or 3xx status.
    async fn is_reachable(&self, url: &str) -> bool;
}

// =============================================================================
// Mail Trait
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait BaseMailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

// =============================================================================
// Publish Sink Trait
// =============================================================================

#[async_trait]
pub trait BasePublishSink: Send + Sync {
    /// Write a complete HTML document under `filename`. Returns where it
    /// landed.
    async fn publish(&self, filename: &str, html: &str) -> Result<PathBuf>;
}
