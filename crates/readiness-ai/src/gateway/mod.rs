//! Gateway to the generative text service used for richer recommendations.

pub mod error;
pub mod openai;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::AdvisorConfig;
use openai::OpenAiAdapter;

pub use error::ProviderError;
pub use types::{Completion, CompletionRequest};

/// Upper bound on a server-requested rate limit wait.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(30);

#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, req: &CompletionRequest) -> Result<Completion, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

/// Wraps a provider with bounded retries for transient failures.
pub struct ProviderGateway {
    provider: Arc<dyn TextGenerator>,
    config: GatewayConfig,
}

impl ProviderGateway {
    pub fn new(provider: Arc<dyn TextGenerator>, config: GatewayConfig) -> Self {
        Self { provider, config }
    }

    /// Builds the OpenAI-backed gateway, or `None` when no credential is configured.
    pub fn from_advisor_config(config: &AdvisorConfig) -> Result<Option<Self>, ProviderError> {
        if !config.is_configured() {
            return Ok(None);
        }

        let adapter = OpenAiAdapter::from_config(config)?;
        Ok(Some(Self::new(
            Arc::new(adapter),
            GatewayConfig {
                max_retries: config.max_retries,
                ..GatewayConfig::default()
            },
        )))
    }

    pub async fn generate(&self, req: &CompletionRequest) -> Result<Completion, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.provider.generate(req).await {
                Ok(completion) => {
                    debug!(
                        model = %req.model,
                        latency_ms = completion.latency.as_millis() as u64,
                        "completion received"
                    );
                    return Ok(completion);
                }
                Err(err) => {
                    if !err.is_retryable() || attempt >= self.config.max_retries {
                        return Err(err);
                    }

                    warn!(code = err.code(), attempt, "retrying completion request");
                    let delay = match &err {
                        ProviderError::RateLimited { retry_after } => {
                            (*retry_after).min(MAX_RATE_LIMIT_WAIT)
                        }
                        _ => backoff_delay(self.config.retry_base_delay, attempt),
                    };
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for ProviderGateway {
    async fn generate(&self, req: &CompletionRequest) -> Result<Completion, ProviderError> {
        ProviderGateway::generate(self, req).await
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let multiplier = 2u32.pow(attempt.min(5));
    base * multiplier
}
