// src/generative/prompt.rs
// Instruction prompts for drafting a reply

use crate::types::Tone;

/// Languages with a dedicated instruction prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLanguage {
    French,
    English,
    Spanish,
}

impl PromptLanguage {
    /// Prompt language for a review language; anything unsupported is English
    pub fn for_language(code: &str) -> Self {
        match code {
            "fr" => Self::French,
            "es" => Self::Spanish,
            _ => Self::English,
        }
    }

    /// Language the draft is expected (and validated) to be written in
    pub fn code(&self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::English => "en",
            Self::Spanish => "es",
        }
    }
}

/// How the tone is phrased inside the prompt
pub fn tone_description(tone: Tone, language: PromptLanguage) -> &'static str {
    use PromptLanguage::*;
    match (tone, language) {
        (Tone::Formal, French) => "professionnel",
        (Tone::Formal, English) => "professional",
        (Tone::Formal, Spanish) => "profesional",
        (Tone::Friendly, French) => "amical",
        (Tone::Friendly, English) => "friendly",
        (Tone::Friendly, Spanish) => "amigable",
        (Tone::Empathetic, French) => "empathique",
        (Tone::Empathetic, English) => "empathetic",
        (Tone::Empathetic, Spanish) => "empático",
    }
}

/// Build the `[INST]`-wrapped prompt. The review is embedded verbatim.
pub fn build_prompt(review_text: &str, tone: Tone, language: PromptLanguage, word_cap: u32) -> String {
    let tone_desc = tone_description(tone, language);
    match language {
        PromptLanguage::French => format!(
            "[INST] Tu es un assistant service client professionnel.\n\n\
             Avis client : \"{review_text}\"\n\n\
             Écris une réponse courte et professionnelle en français (maximum {word_cap} mots).\n\
             - Si l'avis est positif : remercie chaleureusement\n\
             - Si l'avis est négatif : excuse-toi et propose une solution\n\
             - Ton : {tone_desc}\n\n\
             Réponds directement sans introduction ni signature. [/INST]\n"
        ),
        PromptLanguage::English => format!(
            "[INST] You are a professional customer service assistant.\n\n\
             Customer review: \"{review_text}\"\n\n\
             Write a short professional response in English (maximum {word_cap} words).\n\
             - If positive review: thank warmly\n\
             - If negative review: apologize and offer a solution\n\
             - Tone: {tone_desc}\n\n\
             Respond directly without introduction or signature. [/INST]\n"
        ),
        PromptLanguage::Spanish => format!(
            "[INST] Eres un asistente profesional de servicio al cliente.\n\n\
             Reseña del cliente: \"{review_text}\"\n\n\
             Escribe una respuesta corta y profesional en español (máximo {word_cap} palabras).\n\
             - Si es positiva: agradece calurosamente\n\
             - Si es negativa: discúlpate y ofrece una solución\n\
             - Tono: {tone_desc}\n\n\
             Responde directamente sin introducción ni firma. [/INST]\n"
        ),
    }
}
