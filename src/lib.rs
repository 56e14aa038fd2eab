// src/lib.rs
// review-responder - replies to customer reviews in the reviewer's language

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod generative;
pub mod generator;
pub mod language;
pub mod sentiment;
pub mod source;
pub mod templates;
pub mod tone;
pub mod types;

pub use config::ResponderConfig;
pub use error::{ResponderError, Result};
pub use generative::{CompletionBackend, DraftOutcome, Drafter, OllamaBackend};
pub use generator::{Analysis, ResponseGenerator};
pub use language::LanguageDetector;
pub use sentiment::SentimentClassifier;
pub use source::{JsonReviewSource, ReviewSource};
pub use templates::TemplateStore;
pub use types::{GeneratedResponse, ReplyRecord, Review, Sentiment, Tone};
