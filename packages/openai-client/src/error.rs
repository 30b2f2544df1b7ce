//! Errors returned by [`OpenAIClient`](crate::OpenAIClient).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing key or an HTTP client that could not be built.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx reply. `message` is the (truncated) response body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed reply: {0}")]
    Parse(String),

    /// The reply parsed but carried no text for the given endpoint.
    #[error("{0} reply contained no text")]
    EmptyReply(&'static str),
}

impl OpenAIError {
    /// Rate limits and server-side failures; a later attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            OpenAIError::Network(_) => true,
            OpenAIError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        let rate_limited = OpenAIError::Api {
            status: 429,
            message: "slow down".into(),
        };
        let bad_request = OpenAIError::Api {
            status: 400,
            message: "unknown model".into(),
        };
        assert!(rate_limited.is_transient());
        assert!(!bad_request.is_transient());
        assert!(OpenAIError::Network("timeout".into()).is_transient());
        assert!(!OpenAIError::EmptyReply("responses").is_transient());
        assert_eq!(bad_request.to_string(), "API error (400): unknown model");
    }
}
