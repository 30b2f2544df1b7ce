use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use super::BaseLinkChecker;

/// Reachability check over HTTP.
///
/// Tries `HEAD` first. Servers that refuse `HEAD` (405, or 403 from some
/// CDNs) get a `GET`. Redirects are followed; the final status decides.
pub struct HttpLinkChecker {
    client: reqwest::Client,
}

impl HttpLinkChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; workday-brief/0.1)")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

fn is_ok_status(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

#[async_trait]
impl BaseLinkChecker for HttpLinkChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        let status = match self.client.head(url).send().await {
            Ok(response) => response.status(),
            Err(e) => {
                debug!(url, error = %e, "HEAD failed");
                return false;
            }
        };
        if is_ok_status(status) {
            return true;
        }
        if status != StatusCode::METHOD_NOT_ALLOWED && status != StatusCode::FORBIDDEN {
            debug!(url, status = %status, "Link unreachable");
            return false;
        }

        match self.client.get(url).send().await {
            Ok(response) => is_ok_status(response.status()),
            Err(e) => {
                debug!(url, error = %e, "GET fallback failed");
                false
            }
        }
    }
}
