//! OpenAI chat-completions backend.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{CompletionProvider, CompletionRequest, LlmError};

const OPENAI_API_BASE_URL: &str = "https://api.openai.com";

/// Default per-call timeout. The original tool had none; a slow completion
/// would hang the UI indefinitely.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// [`CompletionProvider`] backed by the OpenAI `/v1/chat/completions` API.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a provider with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, OPENAI_API_BASE_URL)
    }

    /// Create a provider against a custom endpoint (proxies, compatible APIs,
    /// test servers).
    ///
    /// Fails only if the HTTP client cannot be constructed (e.g. TLS backend
    /// initialisation). The per-call timeout is part of the client, so a
    /// constructed provider always has it.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
        });
        if let Some(max) = request.max_tokens {
            body["max_tokens"] = json!(max);
        }

        debug!(model = %request.model, "chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::Parse("missing choices[0].message.content".into()))?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_construction_succeeds_with_timeout_configured() {
        assert!(OpenAiProvider::new("sk-test").is_ok());
        assert!(OpenAiProvider::with_base_url("sk-test", "http://localhost:1").is_ok());
    }
}
