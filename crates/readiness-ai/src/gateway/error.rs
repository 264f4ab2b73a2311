//! Error types for the text generation gateway.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the generation service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Service answered with 401/403.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Service returned 429.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Provider error - may be retryable.
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
        retryable: bool,
        status: Option<u16>,
    },

    /// Response carried no usable completion text.
    #[error("empty completion")]
    EmptyCompletion,

    /// HTTP/network error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error (missing API key, etc.).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn provider(provider: &'static str, message: impl Into<String>, retryable: bool) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            retryable,
            status: None,
        }
    }

    pub fn provider_with_status(
        provider: &'static str,
        message: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            retryable: status >= 500,
            status: Some(status),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether a second attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Provider { retryable, .. } => *retryable,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Unauthorized { .. } | Self::EmptyCompletion | Self::Config(_) => false,
        }
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::RateLimited { .. } => "rate_limited",
            Self::Provider { .. } => "provider_error",
            Self::EmptyCompletion => "empty_completion",
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "http_error",
            Self::Config(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        assert!(ProviderError::provider_with_status("openai", "boom", 503).is_retryable());
        assert!(!ProviderError::provider_with_status("openai", "bad request", 400).is_retryable());
        assert!(!ProviderError::Unauthorized {
            message: "invalid key".to_string()
        }
        .is_retryable());
        assert_eq!(ProviderError::EmptyCompletion.code(), "empty_completion");
    }
}
