// src/generator.rs
// Response generator: language -> sentiment -> tone -> draft or template -> envelope

use crate::config::{ResponderConfig, SentimentStrategy};
use crate::error::Result;
use crate::generative::{CompletionBackend, DraftOutcome, Drafter, OllamaBackend};
use crate::language::LanguageDetector;
use crate::sentiment::{CompletionStarRater, LexicalClassifier, ModelClassifier, SentimentClassifier};
use crate::templates::TemplateStore;
use crate::tone::{rating_is_decisive, select_tone};
use crate::types::{GeneratedResponse, ReplyRecord, Review, Sentiment, Tone};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// What the generator decides about a review before writing anything
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub language: String,
    pub sentiment: Sentiment,
    pub tone: Tone,
}

/// Produces one reply per review.
///
/// All state is immutable and shared through `Arc`, so a generator can be
/// cloned into concurrent tasks freely.
#[derive(Clone)]
pub struct ResponseGenerator {
    detector: Arc<LanguageDetector>,
    classifier: Arc<dyn SentimentClassifier>,
    templates: Arc<TemplateStore>,
    drafter: Option<Arc<Drafter>>,
}

impl ResponseGenerator {
    /// Template-only generator
    pub fn new(
        detector: Arc<LanguageDetector>,
        classifier: Arc<dyn SentimentClassifier>,
        templates: Arc<TemplateStore>,
    ) -> Self {
        Self {
            detector,
            classifier,
            templates,
            drafter: None,
        }
    }

    /// Enable generative drafting
    pub fn with_drafter(mut self, drafter: Drafter) -> Self {
        self.drafter = Some(Arc::new(drafter));
        self
    }

    /// Build from configuration, talking to Ollama when a backend is needed.
    /// Without a backend host, model sentiment degrades to lexical and
    /// drafting to templates.
    pub fn from_config(config: &ResponderConfig) -> Result<Self> {
        let needs_backend = config.use_ai || config.sentiment.strategy == SentimentStrategy::Model;
        let needs_backend = needs_backend && config.has_backend_host();
        let backend: Option<Arc<dyn CompletionBackend>> =
            needs_backend.then(|| Arc::new(OllamaBackend::new(&config.backend)) as Arc<dyn CompletionBackend>);
        Self::build(config, backend)
    }

    /// Build from configuration with an injected completion backend
    pub fn from_config_with_backend(
        config: &ResponderConfig,
        backend: Arc<dyn CompletionBackend>,
    ) -> Result<Self> {
        Self::build(config, Some(backend))
    }

    fn build(config: &ResponderConfig, backend: Option<Arc<dyn CompletionBackend>>) -> Result<Self> {
        config.validate().into_result()?;

        let detector = Arc::new(LanguageDetector::new(&config.language));

        let templates = match &config.templates_path {
            Some(path) => TemplateStore::with_overrides(path)?,
            None => TemplateStore::builtin(),
        };

        let classifier: Arc<dyn SentimentClassifier> = match (config.sentiment.strategy, &backend) {
            (SentimentStrategy::Model, Some(backend)) => Arc::new(ModelClassifier::new(Arc::new(
                CompletionStarRater::new(backend.clone()),
            ))),
            (SentimentStrategy::Model, None) => {
                warn!("Model sentiment requested without a backend, using lexical");
                Arc::new(LexicalClassifier::from_config(&config.sentiment))
            }
            (SentimentStrategy::Lexical, _) => Arc::new(LexicalClassifier::from_config(&config.sentiment)),
        };

        let mut generator = Self::new(detector.clone(), classifier, Arc::new(templates));
        if config.use_ai {
            match backend {
                Some(backend) => {
                    generator = generator.with_drafter(Drafter::new(
                        backend,
                        detector,
                        config.generation.clone(),
                    ));
                }
                None => warn!("Generative mode requested without a backend, using templates"),
            }
        }

        info!(
            sentiment = generator.classifier.name(),
            generative = generator.uses_generative(),
            languages = ?generator.templates.languages(),
            "Response generator ready"
        );
        Ok(generator)
    }

    pub fn uses_generative(&self) -> bool {
        self.drafter.is_some()
    }

    /// Language, sentiment and tone for a review, without writing a reply
    pub async fn analyze(&self, review_text: &str, rating: Option<f32>, tone: Option<&str>) -> Analysis {
        let language = self.detector.detect(review_text);
        let sentiment = self.classifier.classify(review_text).await;
        let tone = select_tone(tone, rating, sentiment);
        debug!(%language, %sentiment, %tone, ?rating, "Review analyzed");
        Analysis {
            language,
            sentiment,
            tone,
        }
    }

    /// Reply to one review. Never fails: every generative problem ends in the
    /// template reply.
    #[instrument(skip(self, review_text), fields(chars = review_text.chars().count()))]
    pub async fn generate_response(
        &self,
        review_text: &str,
        rating: Option<f32>,
        tone: Option<&str>,
    ) -> GeneratedResponse {
        let Analysis {
            language,
            sentiment,
            tone,
        } = self.analyze(review_text, rating, tone).await;

        let drafted = match &self.drafter {
            Some(drafter) => match drafter.draft(review_text, tone, &language).await {
                DraftOutcome::Accepted { text, attempts } => {
                    debug!(attempts, "Using generated draft");
                    Some(text)
                }
                DraftOutcome::Exhausted {
                    attempts,
                    last_rejection,
                } => {
                    warn!(attempts, %last_rejection, "No acceptable draft, falling back to templates");
                    None
                }
                DraftOutcome::BackendFailed { attempts, error } => {
                    warn!(attempts, error = %error, "Backend failed, falling back to templates");
                    None
                }
            },
            None => None,
        };

        let used_generative = drafted.is_some();
        let body = drafted.unwrap_or_else(|| self.templates.lookup(&language, tone, sentiment).body());
        let text = self.templates.envelope(&language).wrap(&body);

        GeneratedResponse {
            text,
            tone,
            sentiment,
            language,
            used_generative,
        }
    }

    pub async fn generate_for_review(&self, review: &Review) -> GeneratedResponse {
        self.generate_response(&review.text, review.rating, None).await
    }

    /// Reply to many reviews with bounded concurrency; output order matches input
    pub async fn generate_batch(&self, reviews: Vec<Review>, concurrency: usize) -> Vec<ReplyRecord> {
        self.generate_batch_with_tone(reviews, None, concurrency).await
    }

    /// Like `generate_batch`, with a tone applied to every review whose rating
    /// does not settle the tone on its own (no rating, zero, or middling)
    pub async fn generate_batch_with_tone(
        &self,
        reviews: Vec<Review>,
        tone: Option<&str>,
        concurrency: usize,
    ) -> Vec<ReplyRecord> {
        let concurrency = concurrency.max(1);
        info!(reviews = reviews.len(), concurrency, "Generating replies");

        let records: Vec<ReplyRecord> = stream::iter(reviews)
            .map(|review| async move {
                let explicit = if rating_is_decisive(review.rating) { None } else { tone };
                let response = self.generate_response(&review.text, review.rating, explicit).await;
                ReplyRecord { review, response }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let generated = records.iter().filter(|r| r.response.used_generative).count();
        info!(replies = records.len(), generated, "Batch complete");
        records
    }
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(
            Arc::new(LanguageDetector::default()),
            Arc::new(LexicalClassifier::default()),
            Arc::new(TemplateStore::builtin()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResponderError;

    #[tokio::test]
    async fn test_default_is_template_only() {
        let generator = ResponseGenerator::default();
        assert!(!generator.uses_generative());
        let response = generator.generate_response("Excellent service, très satisfait!", None, None).await;
        assert!(!response.used_generative);
        assert!(!response.text.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_applies_rating() {
        let generator = ResponseGenerator::default();
        let analysis = generator.analyze("Terrible, very disappointed", Some(5.0), None).await;
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.tone, Tone::Friendly);
    }

    #[tokio::test]
    async fn test_template_body_follows_envelope_format() {
        let generator = ResponseGenerator::default();
        let response = generator
            .generate_response("The room was on the second floor and the hotel had a lift.", Some(3.0), None)
            .await;
        assert_eq!(response.language, "en");
        assert_eq!(response.tone, Tone::Formal);
        assert!(response.text.starts_with("Dear customer,\n\n"));
        assert!(response.text.ends_with("\n\nBest regards,\nThe Customer Service Team"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ResponderConfig::default();
        config.batch.concurrency = 0;
        assert!(matches!(
            ResponseGenerator::from_config(&config),
            Err(ResponderError::Config(_))
        ));
    }

    #[test]
    fn test_template_only_config_has_no_drafter() {
        let generator = ResponseGenerator::from_config(&ResponderConfig::default()).unwrap();
        assert!(!generator.uses_generative());
    }

    #[test]
    fn test_missing_templates_file_is_error() {
        let config = ResponderConfig {
            templates_path: Some("/nonexistent/review-responder/templates.toml".into()),
            ..Default::default()
        };
        assert!(matches!(
            ResponseGenerator::from_config(&config),
            Err(ResponderError::Io(_))
        ));
    }

    #[test]
    fn test_model_sentiment_without_host_uses_lexical() {
        let mut config = ResponderConfig::default();
        config.backend.host = String::new();
        config.sentiment.strategy = SentimentStrategy::Model;
        config.use_ai = true;

        let generator = ResponseGenerator::from_config(&config).unwrap();
        assert_eq!(generator.classifier.name(), "lexical");
        assert!(!generator.uses_generative());
    }
}
