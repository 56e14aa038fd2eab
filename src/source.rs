// src/source.rs
// Review sources: where batches of reviews come from

use crate::error::{ResponderError, Result};
use crate::types::Review;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Supplies reviews to reply to
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn name(&self) -> &str;

    /// Up to `max` reviews; fewer is fine
    async fn fetch(&self, max: usize) -> Result<Vec<Review>>;
}

/// One record as written by collectors: a bare string or a full object
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Text(String),
    Full(Review),
}

impl From<RawRecord> for Review {
    fn from(record: RawRecord) -> Self {
        match record {
            RawRecord::Text(text) => Review::new(text),
            RawRecord::Full(review) => review,
        }
    }
}

/// Reviews from a JSON array or newline-delimited JSON file
pub struct JsonReviewSource {
    path: PathBuf,
}

impl JsonReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse file contents; exposed for callers that already hold the text
    pub fn parse(contents: &str) -> Result<Vec<Review>> {
        let trimmed = contents.trim_start();
        let records: Vec<RawRecord> = if trimmed.is_empty() {
            Vec::new()
        } else if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            let mut records = Vec::new();
            for (index, line) in contents.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let record = serde_json::from_str(line).map_err(|e| {
                    ResponderError::Source(format!("line {}: {}", index + 1, e))
                })?;
                records.push(record);
            }
            records
        };

        let total = records.len();
        let reviews: Vec<Review> = records
            .into_iter()
            .map(Review::from)
            .enumerate()
            .filter_map(|(index, review)| {
                if review.text.trim().is_empty() {
                    warn!(record = index + 1, "Skipping review with empty text");
                    None
                } else {
                    Some(review)
                }
            })
            .collect();

        debug!(total, kept = reviews.len(), "Parsed review records");
        Ok(reviews)
    }
}

#[async_trait]
impl ReviewSource for JsonReviewSource {
    fn name(&self) -> &str {
        "json"
    }

    async fn fetch(&self, max: usize) -> Result<Vec<Review>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ResponderError::Source(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let mut reviews = Self::parse(&contents)?;
        reviews.truncate(max);
        info!(path = %self.path.display(), count = reviews.len(), "Loaded reviews");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ============================================================================
    // Parsing
    // ============================================================================

    #[test]
    fn test_parse_json_array() {
        let reviews = JsonReviewSource::parse(
            r#"[{"text": "Great stay", "rating": 5.0}, {"text": "Too noisy", "rating": 2}]"#,
        )
        .unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, Some(5.0));
        assert_eq!(reviews[1].text, "Too noisy");
    }

    #[test]
    fn test_parse_ndjson() {
        let contents = "{\"text\": \"Super accueil\", \"author\": \"Léa\"}\n\n{\"text\": \"Bof\", \"rating\": 3}\n";
        let reviews = JsonReviewSource::parse(contents).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].author.as_deref(), Some("Léa"));
        assert_eq!(reviews[1].rating, Some(3.0));
    }

    #[test]
    fn test_parse_bare_strings() {
        let reviews = JsonReviewSource::parse(r#"["Great stay", {"text": "Bad wifi"}]"#).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "Great stay");
        assert!(reviews[0].rating.is_none());
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let reviews = JsonReviewSource::parse(r#"[{"text": "   "}, {"text": "Nice"}, ""]"#).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "Nice");
    }

    #[test]
    fn test_empty_file() {
        assert!(JsonReviewSource::parse("").unwrap().is_empty());
        assert!(JsonReviewSource::parse("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_bad_ndjson_line_reports_line_number() {
        let err = JsonReviewSource::parse("{\"text\": \"ok\"}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    // ============================================================================
    // Fetching
    // ============================================================================

    #[tokio::test]
    async fn test_fetch_respects_max() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"text": "one"}}, {{"text": "two"}}, {{"text": "three"}}]"#).unwrap();

        let source = JsonReviewSource::new(file.path());
        let reviews = source.fetch(2).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].text, "two");

        // Asking for more than exists returns what is there
        assert_eq!(source.fetch(10).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let source = JsonReviewSource::new("/nonexistent/reviews.json");
        assert!(matches!(source.fetch(5).await, Err(ResponderError::Source(_))));
    }
}
