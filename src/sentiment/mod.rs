// src/sentiment/mod.rs
// Review polarity: a keyword heuristic and a star-rating model behind one trait

mod lexical;
mod model;

pub use lexical::{LexicalClassifier, DEFAULT_NEGATIVE_KEYWORDS, DEFAULT_POSITIVE_KEYWORDS};
pub use model::{parse_star_label, CompletionStarRater, ModelClassifier, StarRater};

use crate::types::Sentiment;
use async_trait::async_trait;

/// Maps review text to a polarity.
///
/// Implementations never fail: anything that goes wrong internally comes back
/// as `Sentiment::Neutral`.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    async fn classify(&self, text: &str) -> Sentiment;
}
