//! Per-area recommendation bundles: generated when the text service is
//! reachable, otherwise drawn from the banded fallback tables.

pub mod fallback;
pub mod prompt;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AdvisorConfig;
use crate::gateway::{CompletionRequest, ProviderGateway, TextGenerator};
use crate::workflows::assessment::domain::{Area, Priority};

pub use fallback::{basic_recommendations, fallback_bundle};

const NO_FEEDBACK: &str = "No specific feedback provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    pub area: String,
    pub priority: Priority,
    pub recommendations: Vec<String>,
    pub use_cases: Vec<String>,
    pub next_steps: Vec<String>,
    pub source: BundleSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub area: String,
    pub score: f64,
    pub comments: String,
    pub context: String,
}

impl RecommendationRequest {
    pub fn new(area: impl Into<String>, score: f64) -> Self {
        let area = area.into();
        let context = score_context(&area, score, false);
        Self {
            area,
            score,
            comments: String::new(),
            context,
        }
    }

    /// Request for a scored area with its collected comments.
    pub fn for_area(area: Area, score: f64, comments: impl Into<String>) -> Self {
        let comments = comments.into();
        let context = score_context(area.label(), score, !comments.trim().is_empty());
        Self {
            area: area.label().to_string(),
            score,
            comments,
            context,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn comments_or_placeholder(&self) -> &str {
        if self.comments.trim().is_empty() {
            NO_FEEDBACK
        } else {
            &self.comments
        }
    }
}

fn score_context(area: &str, score: f64, has_comments: bool) -> String {
    let mut context = format!("Current score: {score:.2}/5.0. Area: {area}.");
    if !has_comments {
        context.push_str(" No specific user comments provided.");
    }
    context
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdvisorStatus {
    Connected,
    NotConnected { reason: String },
}

impl AdvisorStatus {
    pub fn label(&self) -> String {
        match self {
            AdvisorStatus::Connected => "connected".to_string(),
            AdvisorStatus::NotConnected { reason } => format!("not connected ({reason})"),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, AdvisorStatus::Connected)
    }
}

/// Produces recommendation bundles. `recommend` never fails: every service or
/// parse failure degrades to the fallback table.
#[derive(Clone)]
pub struct RecommendationEngine {
    generator: Option<Arc<dyn TextGenerator>>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    status: AdvisorStatus,
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("model", &self.model)
            .field("status", &self.status)
            .finish()
    }
}

impl RecommendationEngine {
    pub fn from_config(config: &AdvisorConfig) -> Self {
        match ProviderGateway::from_advisor_config(config) {
            Ok(Some(gateway)) => Self::with_generator(Arc::new(gateway), config),
            Ok(None) => Self::offline(config, "API key not found or placeholder detected"),
            Err(err) => {
                warn!(code = err.code(), error = %err, "text service client unavailable");
                Self::offline(config, format!("API key error: {err}"))
            }
        }
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>, config: &AdvisorConfig) -> Self {
        Self {
            generator: Some(generator),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            status: AdvisorStatus::Connected,
        }
    }

    pub fn offline(config: &AdvisorConfig, reason: impl Into<String>) -> Self {
        Self {
            generator: None,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            status: AdvisorStatus::NotConnected {
                reason: reason.into(),
            },
        }
    }

    pub fn status(&self) -> &AdvisorStatus {
        &self.status
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> RecommendationBundle {
        let Some(generator) = &self.generator else {
            return fallback_bundle(&request.area, request.score);
        };

        let completion_request = CompletionRequest::new(&self.model, prompt::build_prompt(request))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);

        let completion = match generator.generate(&completion_request).await {
            Ok(completion) => completion,
            Err(err) => {
                warn!(
                    area = %request.area,
                    code = err.code(),
                    error = %err,
                    "generation failed; using fallback recommendations"
                );
                return fallback_bundle(&request.area, request.score);
            }
        };

        match prompt::parse_bundle(&request.area, &completion.content) {
            Ok(bundle) => {
                info!(
                    area = %request.area,
                    latency_ms = completion.latency.as_millis() as u64,
                    "generated recommendations"
                );
                bundle
            }
            Err(err) => {
                warn!(
                    area = %request.area,
                    code = err.code(),
                    error = %err,
                    "unparseable generation; using fallback recommendations"
                );
                fallback_bundle(&request.area, request.score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Completion, ProviderError};
    use std::time::Duration;

    struct FixedGenerator(Result<&'static str, fn() -> ProviderError>);

    #[async_trait::async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _req: &CompletionRequest) -> Result<Completion, ProviderError> {
            match &self.0 {
                Ok(content) => Ok(Completion {
                    content: content.to_string(),
                    latency: Duration::from_millis(3),
                }),
                Err(make) => Err(make()),
            }
        }
    }

    fn engine(generator: FixedGenerator) -> RecommendationEngine {
        RecommendationEngine::with_generator(Arc::new(generator), &AdvisorConfig::default())
    }

    #[tokio::test]
    async fn offline_engine_uses_fallback() {
        let engine = RecommendationEngine::from_config(&AdvisorConfig::default());
        assert_eq!(
            engine.status().label(),
            "not connected (API key not found or placeholder detected)"
        );

        let bundle = engine
            .recommend(&RecommendationRequest::new("Data Readiness", 1.4))
            .await;
        assert_eq!(bundle, fallback_bundle("Data Readiness", 1.4));
    }

    #[tokio::test]
    async fn generated_bundle_is_returned_when_parseable() {
        let engine = engine(FixedGenerator(Ok(
            r#"{"recommendations":["r"],"use_cases":["u"],"next_steps":["s"],"priority":"Low"}"#,
        )));
        assert!(engine.status().is_connected());

        let bundle = engine
            .recommend(&RecommendationRequest::new("Infrastructure", 4.2))
            .await;
        assert_eq!(bundle.source, BundleSource::Generated);
        assert_eq!(bundle.recommendations, vec!["r".to_string()]);
    }

    #[tokio::test]
    async fn service_and_parse_failures_fall_back() {
        let failing = engine(FixedGenerator(Err(|| ProviderError::Unauthorized {
            message: "bad key".to_string(),
        })));
        let bundle = failing
            .recommend(&RecommendationRequest::new("Infrastructure", 2.2))
            .await;
        assert_eq!(bundle.source, BundleSource::Fallback);

        let garbled = engine(FixedGenerator(Ok("I cannot help with that")));
        let bundle = garbled
            .recommend(&RecommendationRequest::new("Infrastructure", 2.2))
            .await;
        assert_eq!(bundle, fallback_bundle("Infrastructure", 2.2));
    }

    #[test]
    fn context_notes_missing_comments() {
        let request = RecommendationRequest::for_area(Area::Infrastructure, 3.0, "");
        assert_eq!(
            request.context,
            "Current score: 3.00/5.0. Area: Infrastructure. No specific user comments provided."
        );
        assert_eq!(request.comments_or_placeholder(), NO_FEEDBACK);
    }
}
