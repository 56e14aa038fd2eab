// src/config/file.rs
// File-based configuration from ~/.review-responder/config.toml

use super::{EnvOverrides, ResponderConfig};
use crate::error::{ResponderError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl ResponderConfig {
    /// Load the config file, apply environment overrides and validate.
    ///
    /// An explicit `path` must exist. Without one, a missing default file
    /// just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!(path = %default_path.display(), "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        EnvOverrides::from_env().apply(&mut config);

        let issues = config.validate();
        for warning in issues.warnings() {
            warn!("{}", warning);
        }
        issues.into_result()?;

        Ok(config)
    }

    /// Parse a config file without touching the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "Loaded config from file");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ResponderError::Config(format!("invalid config: {}", e)))
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".review-responder")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SentimentStrategy;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
use_ai = true

[sentiment]
strategy = "model"
positive_keywords = ["yay"]

[generation]
max_attempts = 5

[backend]
model = "llama3.3"
"#;
        let config = ResponderConfig::from_toml_str(toml).unwrap();
        assert!(config.use_ai);
        assert_eq!(config.sentiment.strategy, SentimentStrategy::Model);
        assert_eq!(config.sentiment.positive_keywords, Some(vec!["yay".to_string()]));
        assert_eq!(config.generation.max_attempts, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.generation.max_chars, 800);
        assert_eq!(config.backend.model, "llama3.3");
        assert_eq!(config.backend.host, "http://localhost:11434");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ResponderConfig::from_toml_str("").unwrap();
        assert!(!config.use_ai);
        assert_eq!(config.batch.concurrency, 4);
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = ResponderConfig::from_toml_str("use_ai = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ResponderError::Config(ref msg) if msg.starts_with("invalid config")));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generation\nmax_attempts = ").unwrap();
        let result = ResponderConfig::from_file(file.path());
        assert!(matches!(result, Err(ResponderError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[batch]\nconcurrency = 2").unwrap();
        let config = ResponderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.batch.concurrency, 2);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = ResponderConfig::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ResponderError::Io(_))));
    }

    #[test]
    fn test_config_path_location() {
        let path = ResponderConfig::config_path();
        assert!(path.ends_with(".review-responder/config.toml"));
    }
}
