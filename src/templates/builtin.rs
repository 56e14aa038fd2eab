// src/templates/builtin.rs
// Built-in reply fragments and envelopes

use crate::types::{Sentiment, Tone};

/// (language, tone, sentiment, greeting, acknowledgment, closing)
pub(super) type FragmentRow = (&'static str, Tone, Sentiment, &'static str, &'static str, &'static str);

/// (language, salutation, sign-off)
pub(super) type EnvelopeRow = (&'static str, &'static str, &'static str);

pub(super) const FRAGMENTS: &[FragmentRow] = &[
    // ── French ──────────────────────────────────────────────────────────
    (
        "fr",
        Tone::Formal,
        Sentiment::Positive,
        "Nous vous remercions sincèrement pour cet avis positif.",
        "Nous sommes ravis que notre service ait répondu à vos attentes.",
        "Nous nous engageons à maintenir ce niveau d'excellence.",
    ),
    (
        "fr",
        Tone::Formal,
        Sentiment::Negative,
        "Nous avons reçu votre avis et nous en prenons acte.",
        "Nous présentons nos sincères excuses pour la situation décrite.",
        "N'hésitez pas à nous contacter directement.",
    ),
    (
        "fr",
        Tone::Formal,
        Sentiment::Neutral,
        "Nous vous remercions d'avoir pris le temps de partager votre retour.",
        "Vos observations sont précieuses.",
        "Nous restons à votre disposition.",
    ),
    (
        "fr",
        Tone::Friendly,
        Sentiment::Positive,
        "Merci beaucoup pour cet avis super !",
        "On est vraiment contents que tu aies eu une bonne expérience avec nous.",
        "On espère te revoir très bientôt !",
    ),
    (
        "fr",
        Tone::Friendly,
        Sentiment::Negative,
        "Merci de nous avoir donné ton retour honnête.",
        "On est vraiment désolés que ça ne se soit pas bien passé.",
        "N'hésite pas à nous contacter directement !",
    ),
    (
        "fr",
        Tone::Friendly,
        Sentiment::Neutral,
        "Merci pour ton avis !",
        "Ton retour nous aide à nous améliorer.",
        "N'hésite pas si besoin !",
    ),
    (
        "fr",
        Tone::Empathetic,
        Sentiment::Positive,
        "Nous vous remercions infiniment pour ce magnifique retour.",
        "Votre satisfaction nous touche profondément.",
        "Nous serions honorés de vous accueillir à nouveau.",
    ),
    (
        "fr",
        Tone::Empathetic,
        Sentiment::Negative,
        "Nous comprenons profondément votre frustration.",
        "Nous sommes vraiment désolés d'avoir déçu vos attentes.",
        "Votre retour est vital pour nous.",
    ),
    (
        "fr",
        Tone::Empathetic,
        Sentiment::Neutral,
        "Nous apprécions profondément votre partage.",
        "Vos observations nous aident à mieux comprendre vos besoins.",
        "Nous restons à votre écoute.",
    ),
    // ── English ─────────────────────────────────────────────────────────
    (
        "en",
        Tone::Formal,
        Sentiment::Positive,
        "Thank you sincerely for your positive review.",
        "We are delighted that our service met your expectations.",
        "We are committed to maintaining this level of excellence.",
    ),
    (
        "en",
        Tone::Formal,
        Sentiment::Negative,
        "We have received your feedback and take it seriously.",
        "We sincerely apologize for the situation described.",
        "Please do not hesitate to contact us directly.",
    ),
    (
        "en",
        Tone::Formal,
        Sentiment::Neutral,
        "Thank you for taking the time to share your feedback.",
        "Your observations are valuable to us.",
        "We remain at your disposal.",
    ),
    (
        "en",
        Tone::Friendly,
        Sentiment::Positive,
        "Thank you so much for this great review!",
        "We're really happy you had a good experience with us.",
        "Hope to see you again soon!",
    ),
    (
        "en",
        Tone::Friendly,
        Sentiment::Negative,
        "Thanks for your honest feedback.",
        "We're really sorry things didn't go well.",
        "Don't hesitate to contact us directly!",
    ),
    (
        "en",
        Tone::Friendly,
        Sentiment::Neutral,
        "Thanks for your review!",
        "Your feedback helps us improve.",
        "Feel free to reach out if needed!",
    ),
    (
        "en",
        Tone::Empathetic,
        Sentiment::Positive,
        "We thank you deeply for this wonderful feedback.",
        "Your satisfaction touches us profoundly.",
        "We would be honored to welcome you again.",
    ),
    (
        "en",
        Tone::Empathetic,
        Sentiment::Negative,
        "We deeply understand your frustration.",
        "We are truly sorry for disappointing your expectations.",
        "Your feedback is vital to us.",
    ),
    (
        "en",
        Tone::Empathetic,
        Sentiment::Neutral,
        "We deeply appreciate you taking the time to share.",
        "Your observations help us better understand your needs.",
        "We remain at your service.",
    ),
];

pub(super) const ENVELOPES: &[EnvelopeRow] = &[
    ("fr", "Cher client", "Cordialement,\nL'équipe Service Client"),
    ("en", "Dear customer", "Best regards,\nThe Customer Service Team"),
    ("es", "Estimado cliente", "Atentamente,\nEl equipo de Atención al Cliente"),
];
