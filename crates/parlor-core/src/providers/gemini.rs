use super::error::ProviderError;
use super::provider::{GenerationParams, LlmProvider, LlmResponse, Message, Role, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Finish reasons that mean the candidate was withheld by a safety filter.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Client for the native Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn build_contents(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "model",
            };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect()
}

fn build_generation_config(params: &GenerationParams) -> Value {
    let mut cfg = Map::new();
    if let Some(t) = params.temperature {
        cfg.insert("temperature".into(), json!(t));
    }
    if let Some(k) = params.top_k {
        cfg.insert("topK".into(), json!(k));
    }
    if let Some(p) = params.top_p {
        cfg.insert("topP".into(), json!(p));
    }
    cfg.insert("maxOutputTokens".into(), json!(params.max_output_tokens));
    Value::Object(cfg)
}

fn parse_reply(data: &Value) -> Result<LlmResponse, ProviderError> {
    if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
        return Err(ProviderError::Blocked {
            reason: reason.to_string(),
        });
    }

    let candidate = &data["candidates"][0];
    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let finish = candidate["finishReason"].as_str().unwrap_or("");
        if BLOCKING_FINISH_REASONS.contains(&finish) {
            return Err(ProviderError::Blocked {
                reason: finish.to_string(),
            });
        }
        return Err(ProviderError::Empty);
    }

    let u = &data["usageMetadata"];
    let usage = TokenUsage {
        input_tokens: u["promptTokenCount"].as_u64().unwrap_or(0) as u32,
        output_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0) as u32,
    };

    Ok(LlmResponse {
        content: text,
        usage,
    })
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        let body = json!({
            "contents": build_contents(messages),
            "generationConfig": build_generation_config(params),
        });

        debug!(model = %self.model, turns = messages.len(), "gemini generateContent");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_response(status.as_u16(), &text));
        }

        let data: Value = resp.json().await?;
        parse_reply(&data)
    }
}
