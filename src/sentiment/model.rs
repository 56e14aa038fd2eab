// src/sentiment/model.rs
// Star-rating classifier collapsed to three sentiment buckets

use super::SentimentClassifier;
use crate::error::{ResponderError, Result};
use crate::generative::CompletionBackend;
use crate::types::Sentiment;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Anything that can score a review from 1 to 5 stars
#[async_trait]
pub trait StarRater: Send + Sync {
    async fn rate(&self, text: &str) -> Result<u8>;
}

/// Parse a label such as `"4 stars"`, `"1 star"` or `"Rating: 3"`.
///
/// Takes the first digit in the label; only 1..=5 is accepted.
pub fn parse_star_label(label: &str) -> Option<u8> {
    let digit = label.trim().chars().find(|c| c.is_ascii_digit())?;
    let stars = digit.to_digit(10)? as u8;
    (1..=5).contains(&stars).then_some(stars)
}

/// Sentiment from a star rater: <=2 negative, 3 neutral, >=4 positive
pub struct ModelClassifier {
    rater: Arc<dyn StarRater>,
}

impl ModelClassifier {
    pub fn new(rater: Arc<dyn StarRater>) -> Self {
        Self { rater }
    }
}

#[async_trait]
impl SentimentClassifier for ModelClassifier {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn classify(&self, text: &str) -> Sentiment {
        match self.rater.rate(text).await {
            Ok(stars) if (1..=5).contains(&stars) => {
                debug!(stars, "Review rated");
                Sentiment::from_stars(stars)
            }
            Ok(stars) => {
                warn!(stars, "Star rating out of range, treating as neutral");
                Sentiment::Neutral
            }
            Err(e) => {
                warn!(error = %e, "Star rating failed, treating as neutral");
                Sentiment::Neutral
            }
        }
    }
}

/// Asks the completion backend for a star label
pub struct CompletionStarRater {
    backend: Arc<dyn CompletionBackend>,
}

impl CompletionStarRater {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    fn prompt(text: &str) -> String {
        format!(
            "Rate the sentiment of the following customer review on a scale from 1 star (very negative) to 5 stars (very positive).\n\n\
             Review: \"{}\"\n\n\
             Only reply with the label, for example \"4 stars\".",
            text
        )
    }
}

#[async_trait]
impl StarRater for CompletionStarRater {
    async fn rate(&self, text: &str) -> Result<u8> {
        let label = self.backend.complete(&Self::prompt(text), 8, 0.0).await?;
        parse_star_label(&label).ok_or_else(|| {
            ResponderError::Backend(format!("unparsable star label '{}'", label.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRater(Result<u8>);

    #[async_trait]
    impl StarRater for FixedRater {
        async fn rate(&self, _text: &str) -> Result<u8> {
            match &self.0 {
                Ok(stars) => Ok(*stars),
                Err(e) => Err(ResponderError::Backend(e.to_string())),
            }
        }
    }

    struct LabelBackend(&'static str);

    #[async_trait]
    impl CompletionBackend for LabelBackend {
        fn name(&self) -> &str {
            "label"
        }

        async fn complete(&self, _prompt: &str, _max_tokens: u32, _temperature: f32) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn classifier(result: Result<u8>) -> ModelClassifier {
        ModelClassifier::new(Arc::new(FixedRater(result)))
    }

    // ============================================================================
    // Label parsing
    // ============================================================================

    #[test]
    fn test_parse_star_label() {
        assert_eq!(parse_star_label("4 stars"), Some(4));
        assert_eq!(parse_star_label("1 star"), Some(1));
        assert_eq!(parse_star_label("  Rating: 3 "), Some(3));
        assert_eq!(parse_star_label("5"), Some(5));
    }

    #[test]
    fn test_parse_star_label_rejects_garbage() {
        assert_eq!(parse_star_label("great"), None);
        assert_eq!(parse_star_label(""), None);
        assert_eq!(parse_star_label("0 stars"), None);
        assert_eq!(parse_star_label("9 stars"), None);
    }

    // ============================================================================
    // Bucketing
    // ============================================================================

    #[tokio::test]
    async fn test_star_buckets() {
        assert_eq!(classifier(Ok(1)).classify("x").await, Sentiment::Negative);
        assert_eq!(classifier(Ok(2)).classify("x").await, Sentiment::Negative);
        assert_eq!(classifier(Ok(3)).classify("x").await, Sentiment::Neutral);
        assert_eq!(classifier(Ok(4)).classify("x").await, Sentiment::Positive);
        assert_eq!(classifier(Ok(5)).classify("x").await, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_failure_is_neutral() {
        let failing = classifier(Err(ResponderError::Backend("offline".into())));
        assert_eq!(failing.classify("Terrible").await, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_out_of_range_is_neutral() {
        assert_eq!(classifier(Ok(7)).classify("x").await, Sentiment::Neutral);
        assert_eq!(classifier(Ok(0)).classify("x").await, Sentiment::Neutral);
    }

    // ============================================================================
    // Backend-driven rater
    // ============================================================================

    #[tokio::test]
    async fn test_completion_rater_parses_label() {
        let rater = CompletionStarRater::new(Arc::new(LabelBackend("2 stars")));
        assert_eq!(rater.rate("Slow service").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_completion_rater_unparsable_label() {
        let rater = CompletionStarRater::new(Arc::new(LabelBackend("It is fine.")));
        let err = rater.rate("Okay").await.unwrap_err();
        assert!(err.to_string().contains("unparsable star label"));

        let classifier = ModelClassifier::new(Arc::new(rater));
        assert_eq!(classifier.classify("Okay").await, Sentiment::Neutral);
    }

    #[test]
    fn test_prompt_embeds_review() {
        let prompt = CompletionStarRater::prompt("Lovely stay");
        assert!(prompt.contains("\"Lovely stay\""));
        assert!(prompt.contains("4 stars"));
    }
}
