// src/types.rs
// Core records: reviews in, generated replies out, and the tone/sentiment enums

use crate::error::ResponderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language code used whenever detection cannot produce one.
pub const DEFAULT_LANGUAGE: &str = "fr";

/// A customer review as handed over by the collection layer.
///
/// Collectors attach extra fields freely; anything unknown is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Review {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rating: None,
            author: None,
            date: None,
        }
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Emotional register of the drafted reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Friendly,
    Empathetic,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Friendly, Tone::Empathetic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Friendly => "friendly",
            Self::Empathetic => "empathetic",
        }
    }

    /// Validate a caller-supplied tone; anything unrecognized becomes `Formal`.
    pub fn parse_or_formal(s: &str) -> Self {
        match s.parse() {
            Ok(tone) => tone,
            Err(_) => {
                tracing::debug!(tone = %s, "Unrecognized tone, using formal");
                Self::Formal
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ResponderError;

    /// Accepts the English names and the French ones the review API was
    /// first published with (`formel`, `amical`, `empathique`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" | "formel" => Ok(Self::Formal),
            "friendly" | "amical" => Ok(Self::Friendly),
            "empathetic" | "empathique" => Ok(Self::Empathetic),
            other => Err(ResponderError::InvalidInput(format!("unknown tone '{}'", other))),
        }
    }
}

/// Polarity of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Collapse a 1-5 star score into three buckets
    pub fn from_stars(stars: u8) -> Self {
        match stars {
            0..=2 => Self::Negative,
            3 => Self::Neutral,
            _ => Self::Positive,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ResponderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(ResponderError::InvalidInput(format!(
                "unknown sentiment '{}'",
                other
            ))),
        }
    }
}

/// The reply produced for one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub text: String,
    pub tone: Tone,
    pub sentiment: Sentiment,
    pub language: String,
    /// True only when the body came from an accepted generative draft
    pub used_generative: bool,
}

/// A review paired with its reply, as emitted by batch runs
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRecord {
    pub review: Review,
    pub response: GeneratedResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parses_english_and_french() {
        assert_eq!("friendly".parse::<Tone>().unwrap(), Tone::Friendly);
        assert_eq!("amical".parse::<Tone>().unwrap(), Tone::Friendly);
        assert_eq!("Empathique".parse::<Tone>().unwrap(), Tone::Empathetic);
        assert_eq!(" FORMAL ".parse::<Tone>().unwrap(), Tone::Formal);
    }

    #[test]
    fn test_tone_unknown_is_error() {
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn test_parse_or_formal_downgrades() {
        assert_eq!(Tone::parse_or_formal("sarcastic"), Tone::Formal);
        assert_eq!(Tone::parse_or_formal(""), Tone::Formal);
        assert_eq!(Tone::parse_or_formal("empathetic"), Tone::Empathetic);
    }

    #[test]
    fn test_sentiment_from_stars() {
        assert_eq!(Sentiment::from_stars(1), Sentiment::Negative);
        assert_eq!(Sentiment::from_stars(2), Sentiment::Negative);
        assert_eq!(Sentiment::from_stars(3), Sentiment::Neutral);
        assert_eq!(Sentiment::from_stars(4), Sentiment::Positive);
        assert_eq!(Sentiment::from_stars(5), Sentiment::Positive);
    }

    #[test]
    fn test_review_ignores_unknown_fields() {
        let json = r#"{"text": "Great", "rating": 5, "platform": "trustpilot"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.text, "Great");
        assert_eq!(review.rating, Some(5.0));
        assert!(review.author.is_none());
    }

    #[test]
    fn test_generated_response_serializes_lowercase() {
        let response = GeneratedResponse {
            text: "Hi".into(),
            tone: Tone::Empathetic,
            sentiment: Sentiment::Negative,
            language: "en".into(),
            used_generative: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tone"], "empathetic");
        assert_eq!(json["sentiment"], "negative");
    }
}
