// src/generative/clean.rs
// Strip greetings, sign-offs, placeholders and self-references from raw completions

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Cleaned text shorter than this falls back to the raw completion
const MIN_CLEANED_CHARS: usize = 20;
/// Upper bound on passes while waiting for the text to stop changing
const MAX_PASSES: usize = 5;

// SAFETY (all statics below): literal patterns; compilation cannot fail.

/// (pattern, replacement) pairs applied everywhere in the text, in order
#[allow(clippy::expect_used)]
static STRIP_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Salutations, including the model's own placeholders
        (r"(?i)Dear \[Client\],?\s*", ""),
        (r"(?i)Dear valued customers?,?\s*", ""),
        (r"(?i)Dear valued guests?,?\s*", ""),
        (r"(?i)Dear customers?,?\s*", ""),
        (r"(?i)Dear clients?,?\s*", ""),
        (r"(?i)Chers? clients?,?\s*", ""),
        (r"(?i)Chères? clientes?,?\s*", ""),
        (r"(?i)Estimados? clientes?,?\s*", ""),
        // Signature placeholders
        (r"(?i)\[Your name\]\s*", ""),
        (r"(?i)\[Votre nom\]\s*", ""),
        (r"(?i)\[Su nombre\]\s*", ""),
        // Sign-offs
        (r"(?i)Merci de votre compréhension\s*", ""),
        (r"(?i)Best regards,\s*", ""),
        (r"(?i)Kind regards,\s*", ""),
        (r"(?i)Cordialement,\s*", ""),
        (r"(?i)Sincerely,\s*", ""),
        (r"(?i)Atentamente,\s*", ""),
        // Self-references; the sentence before keeps its punctuation
        (r"(?i)(^|[.!?]\s+)As an?\s+[^.]+\.\s*", "${1}"),
        (r"(?i)(^|[.!?]\s+)As your\s+[^.]+\.\s*", "${1}"),
        (r"(?i)(^|[.!?]\s+)En tant qu['e]\s+[^.]+\.\s*", "${1}"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
    .collect()
});

/// Placeholders stripped from the raw completion when cleaning removed too much
#[allow(clippy::expect_used)]
static PLACEHOLDER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?im)^Dear \[Client\],?\s*",
        r"(?i)\[Your name\]\s*",
        r"(?i)\[Votre nom\]\s*",
        r"(?i)\[Su nombre\]\s*",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[allow(clippy::expect_used)]
static LEADING_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[.,;:]\s*").expect("valid regex"));

/// Lines starting with one of these are salutations or sign-offs
const LINE_PREFIX_DENYLIST: &[&str] = &[
    "dear customer",
    "dear valued",
    "cher client",
    "chère client",
    "estimado cliente",
    "sincerely",
    "best regards",
    "kind regards",
    "cordialement",
    "atentamente",
    "as an ",
    "as a ",
    "as your ",
    "en tant que ",
    "en tant qu'",
];

/// Lines equal to one of these are signatures
const LINE_EXACT_DENYLIST: &[&str] = &[
    "the customer service team",
    "l'équipe service client",
    "el equipo de atención al cliente",
];

fn is_denylisted_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    LINE_PREFIX_DENYLIST.iter().any(|p| lower.starts_with(p))
        || LINE_EXACT_DENYLIST.contains(&lower.trim_end_matches(['.', '!']))
}

fn clean_pass(text: &str) -> String {
    let mut cleaned = text.trim().to_string();
    for (re, replacement) in STRIP_PATTERNS.iter() {
        cleaned = re.replace_all(&cleaned, *replacement).into_owned();
    }

    let kept: Vec<String> = cleaned
        .lines()
        .map(|line| WHITESPACE_RE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty() && !is_denylisted_line(line))
        .collect();

    LEADING_DOT_RE
        .replace(kept.join(" ").trim(), "")
        .trim()
        .to_string()
}

/// Clean a raw completion into a reply body.
///
/// Passes repeat until the text stops changing, so cleaning an already
/// cleaned body returns it unchanged. When fewer than 20 characters survive,
/// the raw completion is returned with only its placeholders removed.
pub fn clean_completion(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    for _ in 0..MAX_PASSES {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    if current.chars().count() >= MIN_CLEANED_CHARS {
        return current;
    }

    warn!(
        cleaned_chars = current.chars().count(),
        "Cleaning removed almost everything, keeping the raw completion"
    );
    let mut fallback = raw.trim().to_string();
    for re in PLACEHOLDER_PATTERNS.iter() {
        fallback = re.replace_all(&fallback, "").into_owned();
    }
    let fallback = fallback.trim().to_string();
    debug!(chars = fallback.chars().count(), "Raw completion used");
    fallback
}
