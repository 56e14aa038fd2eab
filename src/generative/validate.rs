// src/generative/validate.rs
// Acceptance checks for a cleaned draft

use crate::config::GenerationConfig;
use crate::language::{LanguageDetector, languages_compatible};
use thiserror::Error;
use tracing::debug;

/// Fragments of the instruction prompt that a drafted reply must never echo
const LEAKAGE_MARKERS: &[&str] = &[
    "génère uniquement",
    "formule de politesse",
    "ne pas inclure",
    "do not include",
    "réponds en",
    "respond in",
    "écris une réponse",
    "write a response",
    "[inst]",
    "[/inst]",
];

/// Why a draft was turned down
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("draft too short ({chars} chars, minimum {min})")]
    TooShort { chars: usize, min: usize },

    #[error("draft too long ({chars} chars, maximum {max})")]
    TooLong { chars: usize, max: usize },

    #[error("draft echoes the instructions ('{0}')")]
    Leakage(&'static str),

    #[error("draft language is {detected}, expected {expected}")]
    LanguageMismatch { expected: String, detected: String },
}

/// Accept or reject a cleaned draft.
///
/// Length is counted in characters. A draft whose language cannot be
/// detected passes the language check.
pub fn validate(
    text: &str,
    expected_language: &str,
    detector: &LanguageDetector,
    limits: &GenerationConfig,
) -> std::result::Result<(), Rejection> {
    let chars = text.chars().count();
    if chars < limits.min_chars {
        return Err(Rejection::TooShort {
            chars,
            min: limits.min_chars,
        });
    }
    if chars > limits.max_chars {
        return Err(Rejection::TooLong {
            chars,
            max: limits.max_chars,
        });
    }

    let lower = text.to_lowercase();
    if let Some(marker) = LEAKAGE_MARKERS.iter().find(|m| lower.contains(*m)) {
        return Err(Rejection::Leakage(*marker));
    }

    match detector.detect_opt(text) {
        Some(detected) if !languages_compatible(expected_language, &detected) => {
            Err(Rejection::LanguageMismatch {
                expected: expected_language.to_string(),
                detected,
            })
        }
        Some(detected) => {
            debug!(%detected, expected = %expected_language, "Draft language accepted");
            Ok(())
        }
        None => {
            debug!("Draft language undetectable, accepting");
            Ok(())
        }
    }
}
