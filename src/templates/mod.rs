// src/templates/mod.rs
// Template store: canned reply fragments per (language, tone, sentiment)

mod builtin;

use crate::error::Result;
use crate::types::{Sentiment, Tone};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Language every lookup can ultimately land on
const FALLBACK_LANGUAGE: &str = "en";

static BUILTIN: LazyLock<TemplateStore> = LazyLock::new(TemplateStore::from_builtin_rows);

/// One reply body, in three fragments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateEntry {
    pub greeting: String,
    pub acknowledgment: String,
    pub closing: String,
}

impl TemplateEntry {
    pub fn new(greeting: &str, acknowledgment: &str, closing: &str) -> Self {
        Self {
            greeting: greeting.to_string(),
            acknowledgment: acknowledgment.to_string(),
            closing: closing.to_string(),
        }
    }

    /// The fragments joined into one paragraph
    pub fn body(&self) -> String {
        [&self.greeting, &self.acknowledgment, &self.closing]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Localized salutation and sign-off wrapped around every reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    pub salutation: String,
    pub sign_off: String,
}

impl Envelope {
    /// `<salutation>,\n\n<body>\n\n<sign_off>`
    pub fn wrap(&self, body: &str) -> String {
        format!("{},\n\n{}\n\n{}", self.salutation, body.trim(), self.sign_off)
    }
}

type ToneTable = HashMap<Tone, HashMap<Sentiment, TemplateEntry>>;

/// Read-only fragment table. Built once at startup; lookups never fail.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    languages: HashMap<String, ToneTable>,
    envelopes: HashMap<String, Envelope>,
    /// English formal/neutral, used only when even the English table has no match
    floor: TemplateEntry,
    floor_envelope: Envelope,
}

/// On-disk format for extra templates:
///
/// ```toml
/// [[template]]
/// language = "es"
/// tone = "friendly"
/// sentiment = "positive"
/// greeting = "..."
/// acknowledgment = "..."
/// closing = "..."
///
/// [[envelope]]
/// language = "de"
/// salutation = "Liebe Kundin, lieber Kunde"
/// sign_off = "Mit freundlichen Grüßen"
/// ```
#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default, rename = "template")]
    templates: Vec<TemplateRecord>,
    #[serde(default, rename = "envelope")]
    envelopes: Vec<EnvelopeRecord>,
}

#[derive(Debug, Deserialize)]
struct TemplateRecord {
    language: String,
    tone: Tone,
    sentiment: Sentiment,
    #[serde(flatten)]
    entry: TemplateEntry,
}

#[derive(Debug, Deserialize)]
struct EnvelopeRecord {
    language: String,
    #[serde(flatten)]
    envelope: Envelope,
}

impl TemplateStore {
    /// The built-in French and English tables
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    fn from_builtin_rows() -> Self {
        let mut languages: HashMap<String, ToneTable> = HashMap::new();
        for (language, tone, sentiment, greeting, acknowledgment, closing) in builtin::FRAGMENTS {
            languages
                .entry(language.to_string())
                .or_default()
                .entry(*tone)
                .or_default()
                .insert(*sentiment, TemplateEntry::new(greeting, acknowledgment, closing));
        }

        let envelopes = builtin::ENVELOPES
            .iter()
            .map(|(language, salutation, sign_off)| {
                (
                    language.to_string(),
                    Envelope {
                        salutation: salutation.to_string(),
                        sign_off: sign_off.to_string(),
                    },
                )
            })
            .collect();

        Self {
            languages,
            envelopes,
            floor: TemplateEntry::new(
                "Thank you for taking the time to share your feedback.",
                "Your observations are valuable to us.",
                "We remain at your disposal.",
            ),
            floor_envelope: Envelope {
                salutation: "Dear customer".to_string(),
                sign_off: "Best regards,\nThe Customer Service Team".to_string(),
            },
        }
    }

    /// Built-in tables with the entries of a TOML file merged on top
    pub fn with_overrides(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut store = Self::builtin();
        let added = store.merge_toml(&contents)?;
        info!(path = %path.display(), entries = added, "Loaded template overrides");
        Ok(store)
    }

    /// Merge entries from a TOML document; returns how many records were applied
    pub fn merge_toml(&mut self, contents: &str) -> Result<usize> {
        let file: TemplateFile = toml::from_str(contents)?;
        let count = file.templates.len() + file.envelopes.len();

        for record in file.templates {
            self.languages
                .entry(record.language.trim().to_lowercase())
                .or_default()
                .entry(record.tone)
                .or_default()
                .insert(record.sentiment, record.entry);
        }
        for record in file.envelopes {
            self.envelopes
                .insert(record.language.trim().to_lowercase(), record.envelope);
        }

        Ok(count)
    }

    /// Languages that have their own fragment table
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Fragments for (language, tone, sentiment), never failing.
    ///
    /// Within a language, a missing tone falls back to formal and a missing
    /// sentiment to neutral. A language with no table, or with no usable entry
    /// in its table, falls back to English for the same tone and sentiment.
    /// French always has a table, so French requests stay French.
    pub fn lookup(&self, language: &str, tone: Tone, sentiment: Sentiment) -> &TemplateEntry {
        let candidates = if language == FALLBACK_LANGUAGE {
            vec![language]
        } else {
            vec![language, FALLBACK_LANGUAGE]
        };

        for code in candidates {
            if let Some(entry) = self
                .languages
                .get(code)
                .and_then(|tones| Self::lookup_in(tones, tone, sentiment))
            {
                if code != language {
                    debug!(requested = %language, using = %code, "No templates for language");
                }
                return entry;
            }
        }
        &self.floor
    }

    /// The tone and sentiment chain inside one language table
    fn lookup_in(tones: &ToneTable, tone: Tone, sentiment: Sentiment) -> Option<&TemplateEntry> {
        let formal_neutral = || {
            tones
                .get(&Tone::Formal)
                .and_then(|formal| formal.get(&Sentiment::Neutral))
        };

        match tones.get(&tone).or_else(|| tones.get(&Tone::Formal)) {
            Some(sentiments) => sentiments
                .get(&sentiment)
                .or_else(|| sentiments.get(&Sentiment::Neutral))
                .or_else(formal_neutral),
            None => None,
        }
    }

    /// Salutation and sign-off for a language; unsupported languages get English
    pub fn envelope(&self, language: &str) -> &Envelope {
        self.envelopes
            .get(language)
            .or_else(|| self.envelopes.get(FALLBACK_LANGUAGE))
            .unwrap_or(&self.floor_envelope)
    }

    /// Complete template reply: envelope around the joined fragments
    pub fn render(&self, language: &str, tone: Tone, sentiment: Sentiment) -> String {
        let body = self.lookup(language, tone, sentiment).body();
        self.envelope(language).wrap(&body)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Built-in table
    // ============================================================================

    #[test]
    fn test_builtin_is_complete() {
        let store = TemplateStore::builtin();
        assert_eq!(store.languages(), vec!["en", "fr"]);
        for language in ["fr", "en"] {
            for tone in Tone::ALL {
                for sentiment in Sentiment::ALL {
                    let entry = store.lookup(language, tone, sentiment);
                    assert!(!entry.greeting.is_empty());
                    assert!(!entry.acknowledgment.is_empty());
                    assert!(!entry.closing.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_lookup_french_friendly_positive() {
        let store = TemplateStore::builtin();
        let entry = store.lookup("fr", Tone::Friendly, Sentiment::Positive);
        assert_eq!(entry.greeting, "Merci beaucoup pour cet avis super !");
    }

    #[test]
    fn test_lookup_english_empathetic_negative() {
        let store = TemplateStore::builtin();
        let entry = store.lookup("en", Tone::Empathetic, Sentiment::Negative);
        assert_eq!(entry.greeting, "We deeply understand your frustration.");
    }

    // ============================================================================
    // Fallback chain
    // ============================================================================

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        let store = TemplateStore::builtin();
        let german = store.lookup("de", Tone::Friendly, Sentiment::Positive);
        let english = store.lookup("en", Tone::Friendly, Sentiment::Positive);
        assert_eq!(german, english);
        assert!(!german.body().is_empty());
    }

    #[test]
    fn test_partial_french_table_falls_back_within_french() {
        let mut store = TemplateStore::builtin();
        store.languages.remove("fr");
        store
            .merge_toml(
                r#"
[[template]]
language = "fr"
tone = "formal"
sentiment = "neutral"
greeting = "Bonjour."
acknowledgment = "Merci."
closing = "A bientot."
"#,
            )
            .unwrap();
        // Tone and sentiment missing: formal/neutral of the French table
        let entry = store.lookup("fr", Tone::Friendly, Sentiment::Positive);
        assert_eq!(entry.greeting, "Bonjour.");
    }

    #[test]
    fn test_missing_tone_falls_back_to_formal() {
        let mut store = TemplateStore::builtin();
        store.merge_toml(
            r#"
[[template]]
language = "es"
tone = "formal"
sentiment = "positive"
greeting = "Gracias por su reseña."
acknowledgment = "Nos alegra."
closing = "Hasta pronto."
"#,
        )
        .unwrap();
        let entry = store.lookup("es", Tone::Friendly, Sentiment::Positive);
        assert_eq!(entry.greeting, "Gracias por su reseña.");
    }

    #[test]
    fn test_missing_sentiment_falls_back_to_neutral() {
        let mut store = TemplateStore::builtin();
        store.merge_toml(
            r#"
[[template]]
language = "es"
tone = "friendly"
sentiment = "neutral"
greeting = "¡Gracias!"
acknowledgment = "Tu opinión nos ayuda."
closing = "¡Hasta pronto!"
"#,
        )
        .unwrap();
        let entry = store.lookup("es", Tone::Friendly, Sentiment::Negative);
        assert_eq!(entry.greeting, "¡Gracias!");
    }

    #[test]
    fn test_partial_language_falls_back_to_english_same_tone() {
        let mut store = TemplateStore::builtin();
        store.merge_toml(
            r#"
[[template]]
language = "es"
tone = "friendly"
sentiment = "positive"
greeting = "¡Gracias!"
acknowledgment = "Nos alegra."
closing = "¡Hasta pronto!"
"#,
        )
        .unwrap();
        let entry = store.lookup("es", Tone::Empathetic, Sentiment::Negative);
        assert_eq!(entry, store.lookup("en", Tone::Empathetic, Sentiment::Negative));
        assert_eq!(entry.greeting, "We deeply understand your frustration.");

        let text = store.render("es", Tone::Empathetic, Sentiment::Negative);
        assert!(text.starts_with("Estimado cliente,\n\nWe deeply understand your frustration."));
        assert!(!text.contains("Your observations are valuable to us."));

        // The overridden entry itself is still served
        assert_eq!(store.lookup("es", Tone::Friendly, Sentiment::Positive).greeting, "¡Gracias!");
    }

    #[test]
    fn test_partial_french_table_falls_back_to_english() {
        let mut store = TemplateStore::builtin();
        store.languages.remove("fr");
        store
            .merge_toml(
                r#"
[[template]]
language = "fr"
tone = "friendly"
sentiment = "positive"
greeting = "Merci !"
acknowledgment = "Ravis."
closing = "A bientot !"
"#,
            )
            .unwrap();
        // No French formal/neutral either: English for the same tone and sentiment
        let entry = store.lookup("fr", Tone::Empathetic, Sentiment::Negative);
        assert_eq!(entry.greeting, "We deeply understand your frustration.");
    }

    // ============================================================================
    // Envelope and rendering
    // ============================================================================

    #[test]
    fn test_envelopes() {
        let store = TemplateStore::builtin();
        assert_eq!(store.envelope("fr").salutation, "Cher client");
        assert_eq!(store.envelope("es").salutation, "Estimado cliente");
        assert_eq!(store.envelope("de").salutation, "Dear customer");
    }

    #[test]
    fn test_render_format() {
        let store = TemplateStore::builtin();
        let text = store.render("en", Tone::Formal, Sentiment::Neutral);
        assert_eq!(
            text,
            "Dear customer,\n\nThank you for taking the time to share your feedback. \
             Your observations are valuable to us. We remain at your disposal.\n\n\
             Best regards,\nThe Customer Service Team"
        );
    }

    #[test]
    fn test_body_skips_empty_fragments() {
        let entry = TemplateEntry::new("Hello.", "  ", "Bye.");
        assert_eq!(entry.body(), "Hello. Bye.");
    }

    #[test]
    fn test_merge_envelope_and_count() {
        let mut store = TemplateStore::builtin();
        let added = store
            .merge_toml(
                r#"
[[envelope]]
language = "de"
salutation = "Liebe Kundin, lieber Kunde"
sign_off = "Mit freundlichen Grüßen"
"#,
            )
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.envelope("de").sign_off, "Mit freundlichen Grüßen");
    }

    #[test]
    fn test_merge_rejects_unknown_tone() {
        let mut store = TemplateStore::builtin();
        let result = store.merge_toml(
            r#"
[[template]]
language = "en"
tone = "sarcastic"
sentiment = "neutral"
greeting = "a"
acknowledgment = "b"
closing = "c"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_with_overrides_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[envelope]]\nlanguage = \"it\"\nsalutation = \"Gentile cliente\"\nsign_off = \"Cordiali saluti\""
        )
        .unwrap();
        let store = TemplateStore::with_overrides(file.path()).unwrap();
        assert_eq!(store.envelope("it").salutation, "Gentile cliente");
        // Built-in tables are still there
        assert!(store.languages().contains(&"fr"));
    }
}
