// src/tone.rs
// Tone resolution: rating first, sentiment second, explicit caller choice above both

use crate::types::{Sentiment, Tone};
use tracing::debug;

/// Pick a tone from the star rating, or from the sentiment when there is no
/// usable rating. A rating always wins over the sentiment.
pub fn resolve_tone(rating: Option<f32>, sentiment: Sentiment) -> Tone {
    match rating.filter(|r| r.is_finite()) {
        Some(r) if r >= 4.0 => Tone::Friendly,
        Some(r) if r <= 2.0 => Tone::Empathetic,
        Some(_) => Tone::Formal,
        None => match sentiment {
            Sentiment::Positive => Tone::Friendly,
            Sentiment::Negative => Tone::Empathetic,
            Sentiment::Neutral => Tone::Formal,
        },
    }
}

/// Whether the rating alone settles the tone: 4 stars and up, or 2 and down.
/// Middling ratings and a zero rating leave room for a caller-chosen tone.
pub fn rating_is_decisive(rating: Option<f32>) -> bool {
    match rating.filter(|r| r.is_finite() && *r != 0.0) {
        Some(r) => r >= 4.0 || r <= 2.0,
        None => false,
    }
}

/// Final tone for a call: a caller-supplied tone overrides resolution
/// entirely (unknown names become formal), otherwise `resolve_tone`.
pub fn select_tone(explicit: Option<&str>, rating: Option<f32>, sentiment: Sentiment) -> Tone {
    match explicit {
        Some(name) => {
            let tone = Tone::parse_or_formal(name);
            debug!(requested = %name, %tone, "Using caller tone");
            tone
        }
        None => resolve_tone(rating, sentiment),
    }
}
