// src/generative/drafter.rs
// Draft-clean-validate loop around a completion backend

use super::CompletionBackend;
use super::clean::clean_completion;
use super::prompt::{PromptLanguage, build_prompt};
use super::validate::{Rejection, validate};
use crate::config::GenerationConfig;
use crate::error::ResponderError;
use crate::language::LanguageDetector;
use crate::types::Tone;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Result of one drafting run. The caller picks the fallback.
#[derive(Debug)]
pub enum DraftOutcome {
    /// A cleaned draft passed validation
    Accepted { text: String, attempts: u32 },
    /// Every attempt was rejected
    Exhausted { attempts: u32, last_rejection: Rejection },
    /// The backend call itself failed; no retry was made
    BackendFailed { attempts: u32, error: ResponderError },
}

impl DraftOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Accepted { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::BackendFailed { attempts, .. } => *attempts,
        }
    }

    /// The accepted body, if any
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Accepted { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Drafts reply bodies with bounded retry on rejected output
pub struct Drafter {
    backend: Arc<dyn CompletionBackend>,
    detector: Arc<LanguageDetector>,
    config: GenerationConfig,
}

impl Drafter {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        detector: Arc<LanguageDetector>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            backend,
            detector,
            config,
        }
    }

    /// Draft a reply body for `review_text` in `language`.
    ///
    /// Languages without their own prompt are drafted, and validated, in
    /// English.
    #[instrument(skip(self, review_text), fields(backend = %self.backend.name()))]
    pub async fn draft(&self, review_text: &str, tone: Tone, language: &str) -> DraftOutcome {
        let prompt_language = PromptLanguage::for_language(language);
        let expected = prompt_language.code();
        let prompt = build_prompt(review_text, tone, prompt_language, self.config.word_cap);
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;

            let raw = match self
                .backend
                .complete(&prompt, self.config.max_tokens, self.config.temperature)
                .await
            {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(attempt, error = %error, "Completion failed");
                    return DraftOutcome::BackendFailed {
                        attempts: attempt,
                        error,
                    };
                }
            };

            let cleaned = clean_completion(&raw);
            match validate(&cleaned, expected, &self.detector, &self.config) {
                Ok(()) => {
                    debug!(attempt, chars = cleaned.chars().count(), "Draft accepted");
                    return DraftOutcome::Accepted {
                        text: cleaned,
                        attempts: attempt,
                    };
                }
                Err(rejection) if attempt >= max_attempts => {
                    warn!(attempt, max_attempts, %rejection, "Draft rejected, attempts exhausted");
                    return DraftOutcome::Exhausted {
                        attempts: attempt,
                        last_rejection: rejection,
                    };
                }
                Err(rejection) => {
                    warn!(attempt, max_attempts, %rejection, "Draft rejected, retrying");
                }
            }
        }
    }
}
