use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::SecretString;

pub const DEFAULT_MODELS: &str = "gpt-5.1,gpt-4.1,gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// SMTP settings; present only when every required value is set.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from: String,
    pub to: Vec<String>,
    pub username: String,
    pub password: SecretString,
    pub smtp_host: String,
    pub smtp_port: u16,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<SecretString>,
    /// Ordered model candidates for the synthesis fallback chain
    pub openai_models: Vec<String>,
    pub openai_base_url: String,
    pub tavily_api_key: Option<SecretString>,
    pub search_max_results: usize,
    pub check_link_reachability: bool,
    pub http_timeout: Duration,
    pub email: Option<EmailConfig>,
    pub preserve_model_html: bool,
    pub require_live_result: bool,
    pub docs_dir: PathBuf,
    pub debug_dump_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let flag = |key: &str| get(key).map_or(false, |value| parse_bool(&value));

        let openai_models = split_list(&get("OPENAI_MODELS").unwrap_or_else(|| DEFAULT_MODELS.into()));
        if openai_models.is_empty() {
            anyhow::bail!("OPENAI_MODELS must name at least one model");
        }

        let email = match (
            get("EMAIL_FROM"),
            get("EMAIL_TO"),
            get("GMAIL_USERNAME"),
            get("GMAIL_APP_PASSWORD"),
        ) {
            (Some(from), Some(to), Some(username), Some(password)) => Some(EmailConfig {
                from,
                to: split_list(&to),
                username,
                password: SecretString::new(password),
                smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".into()),
                smtp_port: get("SMTP_PORT")
                    .unwrap_or_else(|| "465".into())
                    .parse()
                    .context("SMTP_PORT must be a valid port number")?,
            }),
            _ => None,
        };

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY").map(SecretString::new),
            openai_models,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            tavily_api_key: get("TAVILY_API_KEY").map(SecretString::new),
            search_max_results: get("SEARCH_MAX_RESULTS")
                .unwrap_or_else(|| "6".into())
                .parse()
                .context("SEARCH_MAX_RESULTS must be a valid number")?,
            check_link_reachability: flag("CHECK_LINK_REACHABILITY"),
            http_timeout: Duration::from_secs(
                get("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".into())
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            ),
            email,
            preserve_model_html: flag("PRESERVE_MODEL_HTML"),
            require_live_result: flag("REQUIRE_LIVE_RESULT"),
            docs_dir: PathBuf::from(get("DOCS_DIR").unwrap_or_else(|| "docs".into())),
            debug_dump_dir: get("DEBUG_DUMP_DIR").map(PathBuf::from),
        })
    }
}

pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_models, vec!["gpt-5.1", "gpt-4.1", "gpt-4o"]);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.search_max_results, 6);
        assert_eq!(config.http_timeout, Duration::from_secs(60));
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert!(config.email.is_none());
        assert!(!config.preserve_model_html);
        assert!(!config.require_live_result);
        assert!(config.debug_dump_dir.is_none());
    }

    #[test]
    fn test_bool_flags() {
        let config = config_from(&[
            ("PRESERVE_MODEL_HTML", "Yes"),
            ("REQUIRE_LIVE_RESULT", "1"),
            ("CHECK_LINK_REACHABILITY", "off"),
        ])
        .unwrap();
        assert!(config.preserve_model_html);
        assert!(config.require_live_result);
        assert!(!config.check_link_reachability);
    }

    #[test]
    fn test_email_requires_all_values() {
        let partial = config_from(&[("EMAIL_FROM", "a@x.com"), ("EMAIL_TO", "b@x.com")]).unwrap();
        assert!(partial.email.is_none());

        let full = config_from(&[
            ("EMAIL_FROM", "a@x.com"),
            ("EMAIL_TO", "b@x.com, c@x.com,"),
            ("GMAIL_USERNAME", "a@x.com"),
            ("GMAIL_APP_PASSWORD", "app-pass"),
        ])
        .unwrap();
        let email = full.email.unwrap();
        assert_eq!(email.to, vec!["b@x.com", "c@x.com"]);
        assert_eq!(email.smtp_host, "smtp.gmail.com");
        assert_eq!(email.smtp_port, 465);
        assert!(!format!("{:?}", email).contains("app-pass"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "  "), ("OPENAI_MODELS", " gpt-4o ")]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_models, vec!["gpt-4o"]);
    }

    #[test]
    fn test_invalid_numbers_fail() {
        let err = config_from(&[("SEARCH_MAX_RESULTS", "many")]).unwrap_err();
        assert!(err.to_string().contains("SEARCH_MAX_RESULTS"));
        assert!(config_from(&[("HTTP_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config_from(&[("OPENAI_MODELS", ",,")]).is_err());
    }
}
