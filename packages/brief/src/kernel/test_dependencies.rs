// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into BriefDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    BaseAI, BaseLinkChecker, BaseMailer, BasePublishSink, BaseSearchService, BriefDeps,
    OutgoingEmail, SearchResult, SynthesisAttempt,
};

// =============================================================================
// Mock Search Service
// =============================================================================

/// Arguments captured from a search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub max_results: usize,
    pub days: u32,
}

/// Queued per-call responses; an `Err` entry makes that call fail.
pub struct MockSearchService {
    responses: Arc<Mutex<Vec<std::result::Result<Vec<SearchResult>, String>>>>,
    calls: Arc<Mutex<Vec<SearchCall>>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_results(self, results: Vec<SearchResult>) -> Self {
        self.responses.lock().unwrap().push(Ok(results));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search(&self, query: &str, max_results: usize, days: u32) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            max_results,
            days,
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty results by default
            return Ok(vec![]);
        }
        responses.remove(0).map_err(|message| anyhow::anyhow!(message))
    }
}

/// Build a search result with sensible defaults
pub fn search_result(title: &str, url: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: url.to_string(),
        content: format!("Snippet about {}", title),
        score: 0.9,
        published_date: Some("2026-10-17".to_string()),
    }
}

// =============================================================================
// Mock AI
// =============================================================================

pub struct MockAI {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    calls: Arc<Mutex<Vec<SynthesisAttempt>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.responses.lock().unwrap().push(Ok(json));
        self
    }

    /// Make the next call fail
    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    /// Attempts made, in order
    pub fn calls(&self) -> Vec<SynthesisAttempt> {
        self.calls.lock().unwrap().clone()
    }

    /// (system, user) prompt pairs, in order
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete_json(
        &self,
        attempt: &SynthesisAttempt,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(attempt.clone());
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            anyhow::bail!("MockAI: no response queued");
        }
        responses.remove(0).map_err(|message| anyhow::anyhow!(message))
    }
}

// =============================================================================
// Mock Link Checker
// =============================================================================

pub struct MockLinkChecker {
    unreachable: HashSet<String>,
    checked: Arc<Mutex<Vec<String>>>,
}

impl MockLinkChecker {
    pub fn new() -> Self {
        Self {
            unreachable: HashSet::new(),
            checked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

impl Default for MockLinkChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseLinkChecker for MockLinkChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        self.checked.lock().unwrap().push(url.to_string());
        !self.unreachable.contains(url)
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

pub struct MockMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        if self.fail {
            anyhow::bail!("MockMailer: SMTP unavailable");
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// =============================================================================
// In-memory Publish Sink
// =============================================================================

pub struct MemorySink {
    pages: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn page(&self, filename: &str) -> Option<String> {
        self.pages.lock().unwrap().get(filename).cloned()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePublishSink for MemorySink {
    async fn publish(&self, filename: &str, html: &str) -> Result<PathBuf> {
        self.pages
            .lock()
            .unwrap()
            .insert(filename.to_string(), html.to_string());
        Ok(PathBuf::from("memory").join(filename))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub search: Arc<MockSearchService>,
    pub ai: Option<Arc<MockAI>>,
    pub link_checker: Option<Arc<MockLinkChecker>>,
    pub mailer: Arc<MockMailer>,
    pub sink: Arc<MemorySink>,
}

impl TestDependencies {
    /// No AI, no link checking, an empty search provider.
    pub fn new() -> Self {
        Self {
            search: Arc::new(MockSearchService::new()),
            ai: None,
            link_checker: None,
            mailer: Arc::new(MockMailer::new()),
            sink: Arc::new(MemorySink::new()),
        }
    }

    /// Set a mock search service
    pub fn mock_search(mut self, service: MockSearchService) -> Self {
        self.search = Arc::new(service);
        self
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    /// Set a mock link checker
    pub fn mock_link_checker(mut self, checker: MockLinkChecker) -> Self {
        self.link_checker = Some(Arc::new(checker));
        self
    }

    /// Set a mock mailer
    pub fn mock_mailer(mut self, mailer: MockMailer) -> Self {
        self.mailer = Arc::new(mailer);
        self
    }

    /// Build BriefDeps sharing these mocks, so calls stay inspectable.
    pub fn deps(&self) -> BriefDeps {
        BriefDeps::new(
            self.search.clone(),
            self.ai.clone().map(|ai| ai as Arc<dyn BaseAI>),
            self.link_checker
                .clone()
                .map(|checker| checker as Arc<dyn BaseLinkChecker>),
            self.mailer.clone(),
            self.sink.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
