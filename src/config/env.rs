// src/config/env.rs
// Environment overrides - single place where env vars are read

use super::{ResponderConfig, SentimentStrategy};
use tracing::{debug, info, warn};

/// Values read from the environment that override the config file
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// REVIEW_RESPONDER_USE_AI
    pub use_ai: Option<bool>,
    /// OLLAMA_HOST
    pub backend_host: Option<String>,
    /// REVIEW_RESPONDER_MODEL
    pub model: Option<String>,
    /// REVIEW_RESPONDER_SENTIMENT
    pub sentiment: Option<SentimentStrategy>,
}

impl EnvOverrides {
    /// Read overrides from the process environment (call once at startup)
    pub fn from_env() -> Self {
        let sentiment = read_var("REVIEW_RESPONDER_SENTIMENT").and_then(|s| match s.parse() {
            Ok(strategy) => Some(strategy),
            Err(e) => {
                warn!(error = %e, "Ignoring REVIEW_RESPONDER_SENTIMENT");
                None
            }
        });

        let overrides = Self {
            use_ai: parse_bool_env("REVIEW_RESPONDER_USE_AI"),
            backend_host: read_var("OLLAMA_HOST"),
            model: read_var("REVIEW_RESPONDER_MODEL"),
            sentiment,
        };
        debug!(?overrides, "Environment overrides loaded");
        overrides
    }

    /// Apply every override that is set
    pub fn apply(self, config: &mut ResponderConfig) {
        if let Some(use_ai) = self.use_ai {
            info!(use_ai, "Generative drafting toggled from environment");
            config.use_ai = use_ai;
        }
        if let Some(host) = self.backend_host {
            config.backend.host = host;
        }
        if let Some(model) = self.model {
            config.backend.model = model;
        }
        if let Some(strategy) = self.sentiment {
            config.sentiment.strategy = strategy;
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool_env(name: &str) -> Option<bool> {
    parse_bool(&std::env::var(name).ok()?)
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
