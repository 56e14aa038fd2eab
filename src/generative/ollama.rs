// src/generative/ollama.rs
// Ollama completion client (local model, /api/generate, non-streaming)

use super::CompletionBackend;
use crate::config::BackendConfig;
use crate::error::{ResponderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Sampling settings sent with every request
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.9;

/// Normalize Ollama base URL by stripping trailing slashes and /v1 suffix
fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().trim_end_matches('/').to_string();
    if url.ends_with("/v1") {
        url.truncate(url.len() - 3);
    }
    url.trim_end_matches('/').to_string()
}

/// Whether requests to `url` stay on this machine. A URL that does not parse
/// counts as local; reqwest reports it on first use.
fn stays_on_host(url: &str) -> bool {
    let Some(host) = url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
    else {
        return true;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    match host.parse::<IpAddr>() {
        Ok(ip) => ip.is_loopback(),
        Err(_) => host.eq_ignore_ascii_case("localhost"),
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Ollama API client (no auth)
pub struct OllamaBackend {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaBackend {
    pub fn new(config: &BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        let normalized = normalize_base_url(&config.host);

        if !stays_on_host(&normalized) {
            warn!(host = %normalized, "Model server is not on this machine; review text will be sent over the network");
        }

        Self {
            base_url: normalized,
            model: config.model.clone(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check that the server answers and the model is pulled
    pub async fn ping(&self) -> Result<()> {
        #[derive(Deserialize)]
        struct Tags {
            #[serde(default)]
            models: Vec<TagModel>,
        }
        #[derive(Deserialize)]
        struct TagModel {
            name: String,
        }

        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResponderError::Backend(format!("Ollama returned {}", status)));
        }

        let tags: Tags = response.json().await?;
        let found = tags
            .models
            .iter()
            .any(|m| m.name == self.model || m.name.split(':').next() == Some(self.model.as_str()));
        if !found {
            return Err(ResponderError::Backend(format!(
                "model '{}' is not available on {} (try `ollama pull {}`)",
                self.model, self.base_url, self.model
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature,
                top_k: TOP_K,
                top_p: TOP_P,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ResponderError::Backend(format!(
                "Ollama error {}: {}",
                status,
                error_body.trim()
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        debug!(chars = parsed.response.chars().count(), "Completion received");
        Ok(parsed.response)
    }
}
