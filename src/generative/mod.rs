// src/generative/mod.rs
// Generative drafting: backend trait, Ollama client, prompt, cleaning, validation, retry

mod backend;
pub mod clean;
mod drafter;
mod ollama;
pub mod prompt;
pub mod validate;

pub use backend::CompletionBackend;
pub use clean::clean_completion;
pub use drafter::{DraftOutcome, Drafter};
pub use ollama::OllamaBackend;
pub use prompt::{PromptLanguage, build_prompt};
pub use validate::{Rejection, validate};
