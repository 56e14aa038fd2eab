// src/config/mod.rs
// Responder configuration: built once at startup, immutable afterwards

pub mod env;
pub mod file;

pub use env::EnvOverrides;

use crate::error::ResponderError;
use crate::types::DEFAULT_LANGUAGE;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which sentiment classifier the generator is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentStrategy {
    /// Keyword counting, no external calls
    #[default]
    Lexical,
    /// 1-5 star rating from the completion backend
    Model,
}

impl FromStr for SentimentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lexical" | "keywords" => Ok(Self::Lexical),
            "model" | "stars" => Ok(Self::Model),
            other => Err(format!("unknown sentiment strategy '{}'", other)),
        }
    }
}

impl fmt::Display for SentimentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// Top-level config structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Try the generative backend before falling back to templates
    pub use_ai: bool,
    /// Optional TOML file whose entries are merged over the built-in templates
    pub templates_path: Option<PathBuf>,
    pub language: LanguageConfig,
    pub sentiment: SentimentConfig,
    pub generation: GenerationConfig,
    pub backend: BackendConfig,
    pub batch: BatchConfig,
}

/// Language detection section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// ISO 639-1 codes the detector may answer with
    pub supported: Vec<String>,
    /// Returned when nothing can be detected
    pub fallback: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            supported: ["fr", "en", "es", "de", "it", "pt", "nl"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Sentiment section. Keyword lists replace the built-in ones when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub strategy: SentimentStrategy,
    pub positive_keywords: Option<Vec<String>>,
    pub negative_keywords: Option<Vec<String>>,
}

/// Generative drafting section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_attempts: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Word cap written into the prompt
    pub word_cap: u32,
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_tokens: 120,
            temperature: 0.7,
            word_cap: 80,
            min_chars: 20,
            max_chars: 800,
        }
    }
}

/// Completion backend section (local Ollama server)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

/// Batch processing section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Reviews processed concurrently
    pub concurrency: usize,
    /// Upper bound on reviews taken from a source
    pub max_reviews: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_reviews: 10,
        }
    }
}

/// Problems found in a configuration. Warnings are logged, errors refuse it.
#[derive(Debug, Default)]
pub struct ConfigIssues {
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl ConfigIssues {
    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn reject(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing refuses the config, else one `ResponderError::Config`
    /// listing every error
    pub fn into_result(self) -> crate::error::Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ResponderError::Config(self.errors.join("; ")))
        }
    }
}

impl ResponderConfig {
    /// Check invariants the rest of the crate relies on
    pub fn validate(&self) -> ConfigIssues {
        let mut issues = ConfigIssues::default();

        if self.generation.max_attempts == 0 {
            issues.reject("generation.max_attempts must be at least 1");
        }
        if self.generation.min_chars > self.generation.max_chars {
            issues.reject(format!(
                "generation.min_chars ({}) exceeds generation.max_chars ({})",
                self.generation.min_chars, self.generation.max_chars
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            issues.warn(format!(
                "generation.temperature {} is outside 0.0..=2.0",
                self.generation.temperature
            ));
        }
        if self.batch.concurrency == 0 {
            issues.reject("batch.concurrency must be at least 1");
        }
        if self.language.supported.is_empty() {
            issues.warn("language.supported is empty; every review will use the fallback language");
        }
        if !self.has_backend_host() {
            if self.sentiment.strategy == SentimentStrategy::Model {
                issues.warn("model sentiment requires a backend host; lexical will be used");
            }
            if self.use_ai {
                issues.warn("use_ai requires a backend host; templates will be used");
            }
        }

        issues
    }

    /// Whether a model server is configured at all
    pub fn has_backend_host(&self) -> bool {
        !self.backend.host.trim().is_empty()
    }
}
