use crate::providers::ProviderError;
use thiserror::Error;

pub const MISSING_CREDENTIAL_TEXT: &str =
    "API key not configured. Please add your Gemini API key to the .env file.";
pub const NOT_FOUND_TEXT: &str = "Personality configuration not found.";
pub const INVALID_CREDENTIAL_TEXT: &str =
    "Invalid API key. Please check your Gemini API key configuration.";
pub const NETWORK_TEXT: &str =
    "Network error. Please check your internet connection and try again.";
pub const RATE_LIMIT_TEXT: &str = "Rate limit exceeded. Please wait a moment before trying again.";
pub const CONTENT_FILTERED_TEXT: &str =
    "I apologize, but I cannot provide a response to that message.";
pub const UNKNOWN_TEXT: &str =
    "I apologize, but I am unable to respond at the moment. Please try again later.";

/// Why a reply could not be produced. The payload, where present, is the
/// upstream detail kept for logs; users only ever see [`user_message`].
///
/// [`user_message`]: GenerateError::user_message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("API key not configured")]
    MissingCredential,
    #[error("no configuration for personality '{0}'")]
    PersonalityNotFound(String),
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("content filtered: {0}")]
    ContentFiltered(String),
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl GenerateError {
    /// Fixed text shown in the chat in place of a reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::MissingCredential => MISSING_CREDENTIAL_TEXT,
            GenerateError::PersonalityNotFound(_) => NOT_FOUND_TEXT,
            GenerateError::InvalidCredential(_) => INVALID_CREDENTIAL_TEXT,
            GenerateError::Network(_) => NETWORK_TEXT,
            GenerateError::RateLimited(_) => RATE_LIMIT_TEXT,
            GenerateError::ContentFiltered(_) => CONTENT_FILTERED_TEXT,
            GenerateError::Unknown(_) => UNKNOWN_TEXT,
        }
    }

    /// Classify a provider failure.
    ///
    /// Structured data (HTTP status, API status string, block reason, reqwest
    /// error kind) decides first. Only when that says nothing do we fall back
    /// to looking for known phrases in the message text.
    pub fn classify(err: &ProviderError) -> Self {
        let detail = err.to_string();
        if let Some(kind) = classify_structured(err, &detail) {
            return kind;
        }
        classify_text(detail)
    }
}

fn classify_structured(err: &ProviderError, detail: &str) -> Option<GenerateError> {
    let detail = detail.to_string();
    match err {
        ProviderError::Blocked { .. } => Some(GenerateError::ContentFiltered(detail)),
        ProviderError::Api { code, status, .. } => {
            let status = status.as_deref().unwrap_or("");
            match (*code, status) {
                (401 | 403, _) | (_, "UNAUTHENTICATED" | "PERMISSION_DENIED") => {
                    Some(GenerateError::InvalidCredential(detail))
                }
                (429, _) | (_, "RESOURCE_EXHAUSTED") => Some(GenerateError::RateLimited(detail)),
                _ => None,
            }
        }
        ProviderError::Http(e) if e.is_connect() || e.is_timeout() => {
            Some(GenerateError::Network(detail))
        }
        _ => None,
    }
}

fn classify_text(detail: String) -> GenerateError {
    if detail.contains("API key") {
        GenerateError::InvalidCredential(detail)
    } else if detail.contains("network") {
        GenerateError::Network(detail)
    } else if detail.contains("rate limit") {
        GenerateError::RateLimited(detail)
    } else if detail.contains("content filtered") {
        GenerateError::ContentFiltered(detail)
    } else {
        GenerateError::Unknown(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: u16, status: Option<&str>, message: &str) -> ProviderError {
        ProviderError::Api {
            code,
            status: status.map(String::from),
            message: message.to_string(),
        }
    }

    #[test]
    fn structured_codes_win() {
        assert!(matches!(
            GenerateError::classify(&api(429, None, "slow down")),
            GenerateError::RateLimited(_)
        ));
        assert!(matches!(
            GenerateError::classify(&api(400, Some("RESOURCE_EXHAUSTED"), "quota")),
            GenerateError::RateLimited(_)
        ));
        assert!(matches!(
            GenerateError::classify(&api(403, Some("PERMISSION_DENIED"), "denied")),
            GenerateError::InvalidCredential(_)
        ));
        assert!(matches!(
            GenerateError::classify(&ProviderError::Blocked {
                reason: "SAFETY".into()
            }),
            GenerateError::ContentFiltered(_)
        ));
    }

    #[test]
    fn gemini_bad_key_falls_back_to_text() {
        let err = api(400, Some("INVALID_ARGUMENT"), "API key not valid. Please pass a valid API key.");
        assert!(matches!(
            GenerateError::classify(&err),
            GenerateError::InvalidCredential(_)
        ));
    }

    #[test]
    fn text_fallback_follows_phrase_order() {
        let cases = [
            ("bad API key", GenerateError::InvalidCredential(String::new())),
            ("network unreachable", GenerateError::Network(String::new())),
            ("hit the rate limit", GenerateError::RateLimited(String::new())),
            ("content filtered upstream", GenerateError::ContentFiltered(String::new())),
            ("API key over network", GenerateError::InvalidCredential(String::new())),
            ("something odd", GenerateError::Unknown(String::new())),
        ];
        for (text, expected) in cases {
            let got = GenerateError::classify(&ProviderError::Other(text.into()));
            assert_eq!(
                std::mem::discriminant(&got),
                std::mem::discriminant(&expected),
                "{text}"
            );
        }
    }

    #[test]
    fn server_errors_are_unknown() {
        assert!(matches!(
            GenerateError::classify(&api(500, Some("INTERNAL"), "boom")),
            GenerateError::Unknown(_)
        ));
        assert!(matches!(
            GenerateError::classify(&ProviderError::Empty),
            GenerateError::Unknown(_)
        ));
    }

    #[test]
    fn user_messages_are_fixed() {
        assert_eq!(GenerateError::MissingCredential.user_message(), MISSING_CREDENTIAL_TEXT);
        assert_eq!(
            GenerateError::PersonalityNotFound("x".into()).user_message(),
            "Personality configuration not found."
        );
        assert_eq!(
            GenerateError::RateLimited("429".into()).user_message(),
            "Rate limit exceeded. Please wait a moment before trying again."
        );
    }
}
