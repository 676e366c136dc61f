use super::error::ProviderError;
use super::provider::{GenerationParams, LlmProvider, LlmResponse, Message, Role, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

/// Client for OpenAI-compatible `/chat/completions` servers (llama.cpp,
/// vLLM, Ollama and friends). `top_k` has no counterpart there and is dropped.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    keyless: bool,
}

impl OpenAiProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            keyless: false,
        }
    }

    /// Mark the endpoint as not needing a key (local servers).
    pub fn keyless(mut self) -> Self {
        self.keyless = true;
        self
    }
}

fn build_messages(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "assistant",
            };
            json!({ "role": role, "content": m.content })
        })
        .collect()
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        self.keyless || !self.api_key.is_empty()
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        let mut body = json!({
            "model": self.model,
            "messages": build_messages(messages),
            "max_tokens": params.max_output_tokens,
        });
        if let Some(t) = params.temperature {
            body["temperature"] = json!(t);
        }
        if let Some(p) = params.top_p {
            body["top_p"] = json!(p);
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(model = %self.model, turns = messages.len(), "chat/completions");
        let mut req = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_response(status.as_u16(), &text));
        }
        let data: Value = resp.json().await?;

        let choice = &data["choices"][0];
        if choice["finish_reason"].as_str() == Some("content_filter") {
            return Err(ProviderError::Blocked {
                reason: "content_filter".into(),
            });
        }
        let content = choice["message"]["content"].as_str().unwrap_or("").to_string();
        if content.is_empty() {
            return Err(ProviderError::Empty);
        }

        let u = &data["usage"];
        let usage = TokenUsage {
            input_tokens: u["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: u["completion_tokens"].as_u64().unwrap_or(0) as u32,
        };
        Ok(LlmResponse { content, usage })
    }
}
