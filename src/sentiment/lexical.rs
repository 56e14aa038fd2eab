// src/sentiment/lexical.rs
// Keyword-count sentiment heuristic

use super::SentimentClassifier;
use crate::config::SentimentConfig;
use crate::types::Sentiment;
use async_trait::async_trait;
use regex::Regex;
use std::cmp::Ordering;
use tracing::warn;

// ── Keyword tables ──────────────────────────────────────────────────────
// Mixed French/English. A keyword matches at the start of a word, so "love"
// also catches "loved" but "lent" never fires inside "excellent". Each
// keyword counts once per review.

pub const DEFAULT_POSITIVE_KEYWORDS: &[&str] = &[
    "excellent",
    "super",
    "fantastique",
    "merveilleux",
    "génial",
    "adoré",
    "parfait",
    "bravo",
    "très bon",
    "satisfait",
    "content",
    "wonderful",
    "amazing",
    "great",
    "perfect",
    "love",
    "formidable",
    "top",
    "recommande",
    "qualité",
    "professionnel",
    "rapide",
    "efficace",
];

pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "mauvais",
    "horrible",
    "décevant",
    "nul",
    "catastrophe",
    "problème",
    "plainte",
    "déçu",
    "très mauvais",
    "pire",
    "refus",
    "discrimination",
    "terrible",
    "awful",
    "bad",
    "worst",
    "disappointed",
    "lent",
    "incompétent",
    "arnaque",
    "scandale",
    "inadmissible",
    "honte",
    "frustré",
    "horrific",
];

/// Counts positive and negative keywords present in the text
#[derive(Debug, Clone)]
pub struct LexicalClassifier {
    positive: Vec<Regex>,
    negative: Vec<Regex>,
}

impl LexicalClassifier {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self {
            positive: compile_keywords(positive),
            negative: compile_keywords(negative),
        }
    }

    /// Built-in tables, replaced list-by-list by whatever the config provides
    pub fn from_config(config: &SentimentConfig) -> Self {
        let positive = config
            .positive_keywords
            .clone()
            .unwrap_or_else(|| to_owned(DEFAULT_POSITIVE_KEYWORDS));
        let negative = config
            .negative_keywords
            .clone()
            .unwrap_or_else(|| to_owned(DEFAULT_NEGATIVE_KEYWORDS));
        Self::new(positive, negative)
    }

    /// (positive, negative) keyword hits
    pub fn counts(&self, text: &str) -> (usize, usize) {
        let lowered = text.to_lowercase();
        let hits = |keywords: &[Regex]| keywords.iter().filter(|k| k.is_match(&lowered)).count();
        (hits(&self.positive), hits(&self.negative))
    }

    pub fn classify_sync(&self, text: &str) -> Sentiment {
        let (positive, negative) = self.counts(text);
        match positive.cmp(&negative) {
            Ordering::Greater => Sentiment::Positive,
            Ordering::Less => Sentiment::Negative,
            Ordering::Equal => Sentiment::Neutral,
        }
    }
}

impl Default for LexicalClassifier {
    fn default() -> Self {
        Self::new(to_owned(DEFAULT_POSITIVE_KEYWORDS), to_owned(DEFAULT_NEGATIVE_KEYWORDS))
    }
}

#[async_trait]
impl SentimentClassifier for LexicalClassifier {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn classify(&self, text: &str) -> Sentiment {
        self.classify_sync(text)
    }
}

fn compile_keywords(keywords: Vec<String>) -> Vec<Regex> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .filter_map(|k| match Regex::new(&format!(r"\b{}", regex::escape(&k))) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(keyword = %k, error = %e, "Skipping sentiment keyword");
                None
            }
        })
        .collect()
}

fn to_owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}
