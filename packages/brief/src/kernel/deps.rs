//! Brief dependencies for activities (using traits for testability)
//!
//! This module provides the dependency container used by every activity in
//! the pipeline. All external services sit behind trait objects so tests can
//! swap in the mocks from `test_dependencies`.

use anyhow::{Context, Result};
use openai_client::OpenAIClient;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::kernel::{
    BaseAI, BaseLinkChecker, BaseMailer, BasePublishSink, BaseSearchService, DocsDirSink,
    HttpLinkChecker, NoopMailer, NoopSearchService, SmtpMailer, TavilyClient,
};

/// Dependencies accessible to activities
#[derive(Clone)]
pub struct BriefDeps {
    pub search: Arc<dyn BaseSearchService>,
    /// `None` when no provider key is configured; synthesis then uses the
    /// built-in placeholder brief.
    pub ai: Option<Arc<dyn BaseAI>>,
    /// Present only when reachability filtering is switched on.
    pub link_checker: Option<Arc<dyn BaseLinkChecker>>,
    pub mailer: Arc<dyn BaseMailer>,
    pub publish_sink: Arc<dyn BasePublishSink>,
}

impl BriefDeps {
    pub fn new(
        search: Arc<dyn BaseSearchService>,
        ai: Option<Arc<dyn BaseAI>>,
        link_checker: Option<Arc<dyn BaseLinkChecker>>,
        mailer: Arc<dyn BaseMailer>,
        publish_sink: Arc<dyn BasePublishSink>,
    ) -> Self {
        Self {
            search,
            ai,
            link_checker,
            mailer,
            publish_sink,
        }
    }

    /// Wire the production adapters for whatever the configuration enables.
    pub fn from_config(config: &Config) -> Result<Self> {
        let search: Arc<dyn BaseSearchService> = match &config.tavily_api_key {
            Some(key) => Arc::new(TavilyClient::new(key.clone(), config.http_timeout)?),
            None => {
                info!("TAVILY_API_KEY not set; source acquisition disabled");
                Arc::new(NoopSearchService)
            }
        };

        let ai: Option<Arc<dyn BaseAI>> = match &config.openai_api_key {
            Some(key) => {
                let client = OpenAIClient::new(key.expose())
                    .with_base_url(&config.openai_base_url)
                    .with_timeout(config.http_timeout)
                    .context("Failed to create OpenAI client")?;
                Some(Arc::new(client))
            }
            None => None,
        };

        let link_checker: Option<Arc<dyn BaseLinkChecker>> = if config.check_link_reachability {
            Some(Arc::new(HttpLinkChecker::new(config.http_timeout)?))
        } else {
            None
        };

        let mailer: Arc<dyn BaseMailer> = match &config.email {
            Some(email) => Arc::new(SmtpMailer::new(email, config.http_timeout)),
            None => Arc::new(NoopMailer),
        };

        Ok(Self::new(
            search,
            ai,
            link_checker,
            mailer,
            Arc::new(DocsDirSink::new(&config.docs_dir)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_config_without_credentials() {
        let vars: HashMap<String, String> = HashMap::new();
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let deps = BriefDeps::from_config(&config).unwrap();
        assert!(!deps.search.is_configured());
        assert!(deps.ai.is_none());
        assert!(deps.link_checker.is_none());
    }

    #[test]
    fn test_from_config_with_keys() {
        let vars: HashMap<String, String> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("TAVILY_API_KEY", "tvly-test"),
            ("CHECK_LINK_REACHABILITY", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let deps = BriefDeps::from_config(&config).unwrap();
        assert!(deps.search.is_configured());
        assert!(deps.ai.is_some());
        assert!(deps.link_checker.is_some());
    }
}
