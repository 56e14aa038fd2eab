// src/generative/backend.rs
// Completion backend abstraction

use crate::error::Result;
use async_trait::async_trait;

/// A text-completion model behind a single call.
///
/// The backend owns its transport (timeouts, connection reuse). The drafter
/// treats any `Err` as a transport failure and stops retrying.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Raw completion for `prompt`
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}
