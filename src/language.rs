// src/language.rs
// Language identification for reviews and drafted replies

use crate::config::LanguageConfig;
use tracing::{debug, warn};
use whatlang::{Detector, Lang};

/// Map an ISO 639-1 code to the detector's language, for the codes we allow
fn lang_from_iso1(code: &str) -> Option<Lang> {
    match code.trim().to_lowercase().as_str() {
        "fr" => Some(Lang::Fra),
        "en" => Some(Lang::Eng),
        "es" => Some(Lang::Spa),
        "de" => Some(Lang::Deu),
        "it" => Some(Lang::Ita),
        "pt" => Some(Lang::Por),
        "nl" => Some(Lang::Nld),
        "no" | "nb" => Some(Lang::Nob),
        "da" => Some(Lang::Dan),
        "sv" => Some(Lang::Swe),
        "pl" => Some(Lang::Pol),
        "ro" => Some(Lang::Ron),
        _ => None,
    }
}

fn iso1_from_lang(lang: Lang) -> Option<&'static str> {
    match lang {
        Lang::Fra => Some("fr"),
        Lang::Eng => Some("en"),
        Lang::Spa => Some("es"),
        Lang::Deu => Some("de"),
        Lang::Ita => Some("it"),
        Lang::Por => Some("pt"),
        Lang::Nld => Some("nl"),
        Lang::Nob => Some("no"),
        Lang::Dan => Some("da"),
        Lang::Swe => Some("sv"),
        Lang::Pol => Some("pl"),
        Lang::Ron => Some("ro"),
        _ => None,
    }
}

/// Detects the ISO 639-1 code of a text.
///
/// The trigram model is deterministic, so the same text always yields the
/// same code. Very short or mixed-language text can still come back with a
/// poor guess; callers accept that.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    allowlist: Vec<Lang>,
    fallback: String,
}

impl LanguageDetector {
    pub fn new(config: &LanguageConfig) -> Self {
        let mut allowlist = Vec::new();
        for code in &config.supported {
            match lang_from_iso1(code) {
                Some(lang) if !allowlist.contains(&lang) => allowlist.push(lang),
                Some(_) => {}
                None => warn!(code = %code, "Unsupported detection language ignored"),
            }
        }

        Self {
            allowlist,
            fallback: config.fallback.clone(),
        }
    }

    /// Best-guess language code, or the fallback (`"fr"` by default)
    pub fn detect(&self, text: &str) -> String {
        self.detect_opt(text).unwrap_or_else(|| {
            debug!(fallback = %self.fallback, "Language detection failed, using fallback");
            self.fallback.clone()
        })
    }

    /// Raw detection outcome; `None` when no language could be identified
    pub fn detect_opt(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let detector = if self.allowlist.is_empty() {
            Detector::new()
        } else {
            Detector::with_allowlist(self.allowlist.clone())
        };
        let info = detector.detect(text)?;
        iso1_from_lang(info.lang()).map(str::to_string)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(&LanguageConfig::default())
    }
}

/// Languages a drafted reply may come back in without being rejected, keyed
/// by the language that was asked for. Close languages confuse the detector
/// on short replies.
pub fn tolerated_languages(expected: &str) -> &'static [&'static str] {
    match expected {
        "en" => &["es", "nl", "no"],
        "es" => &["en", "pt", "ca"],
        "fr" => &["es", "it"],
        _ => &[],
    }
}

/// True when `detected` is acceptable for a reply requested in `expected`
pub fn languages_compatible(expected: &str, detected: &str) -> bool {
    expected == detected || tolerated_languages(expected).contains(&detected)
}
