use serde_json::Value;
use thiserror::Error;

/// Failure reported by an [`LlmProvider`](super::LlmProvider).
///
/// Variants keep whatever structure the upstream API gave us so callers can
/// classify on codes rather than on message text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("status {code}{}: {message}", fmt_status(.status))]
    Api {
        code: u16,
        status: Option<String>,
        message: String,
    },
    #[error("content filtered: {reason}")]
    Blocked { reason: String },
    #[error("empty response")]
    Empty,
    #[error("{0}")]
    Other(String),
}

fn fmt_status(status: &Option<String>) -> String {
    status.as_deref().map(|s| format!(" {s}")).unwrap_or_default()
}

impl ProviderError {
    /// Build an [`ProviderError::Api`] from a non-success HTTP reply.
    ///
    /// Understands both the Google `{error:{code,message,status}}` shape and the
    /// OpenAI `{error:{message,type}}` shape; anything else keeps the raw body.
    pub fn from_response(code: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let error = parsed.as_ref().map(|v| {
            // Some gateways wrap the object in a one-element array
            if v.is_array() {
                v[0]["error"].clone()
            } else {
                v["error"].clone()
            }
        });

        match error {
            Some(e) if e.is_object() => {
                let message = e["message"]
                    .as_str()
                    .map(|m| m.split(". Please refer to").next().unwrap_or(m).trim().to_string())
                    .unwrap_or_else(|| body.to_string());
                let status = e["status"]
                    .as_str()
                    .or_else(|| e["type"].as_str())
                    .map(String::from);
                ProviderError::Api {
                    code,
                    status,
                    message,
                }
            }
            _ => ProviderError::Api {
                code,
                status: None,
                message: body.trim().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_google_error_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        match ProviderError::from_response(400, body) {
            ProviderError::Api {
                code,
                status,
                message,
            } => {
                assert_eq!(code, 400);
                assert_eq!(status.as_deref(), Some("INVALID_ARGUMENT"));
                assert!(message.starts_with("API key not valid"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn parses_array_wrapped_error_and_trims_reference_suffix() {
        let body = r#"[{"error":{"code":429,"message":"Quota exceeded. Please refer to the docs","status":"RESOURCE_EXHAUSTED"}}]"#;
        let err = ProviderError::from_response(429, body);
        assert_eq!(
            err.to_string(),
            "status 429 RESOURCE_EXHAUSTED: Quota exceeded"
        );
    }

    #[test]
    fn keeps_raw_body_when_not_json() {
        let err = ProviderError::from_response(502, "bad gateway\n");
        assert_eq!(err.to_string(), "status 502: bad gateway");
    }
}
