use super::error::GenerateError;
use crate::catalog::Catalog;
use crate::providers::LlmProvider;
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;

/// Turns a user utterance into a personality's reply.
///
/// Owns nothing global: the provider, catalog and session store are all
/// injected, so several generators (or tests) never share hidden state.
pub struct ResponseGenerator {
    provider: Arc<dyn LlmProvider>,
    catalog: Arc<Catalog>,
    sessions: Arc<SessionStore>,
    max_output_tokens: u32,
}

impl ResponseGenerator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        catalog: Arc<Catalog>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            provider,
            catalog,
            sessions,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.max_output_tokens = n;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Produce a formatted reply or say why not.
    ///
    /// Checks the credential before anything else, then the personality's
    /// config; neither failure touches the network or the session store.
    pub async fn generate(&self, personality_id: &str, text: &str) -> Result<String, GenerateError> {
        if !self.provider.is_configured() {
            return Err(GenerateError::MissingCredential);
        }
        let config = self
            .catalog
            .config(personality_id)
            .ok_or_else(|| GenerateError::PersonalityNotFound(personality_id.to_string()))?;

        let session = self
            .sessions
            .get_or_create(personality_id, config, self.max_output_tokens);
        let mut session = session.lock().await;

        match session.send(self.provider.as_ref(), text).await {
            Ok(resp) => {
                debug!(
                    personality = %personality_id,
                    input_tokens = resp.usage.input_tokens,
                    output_tokens = resp.usage.output_tokens,
                    "reply received"
                );
                Ok(config.format(&resp.content))
            }
            Err(e) => {
                let kind = GenerateError::classify(&e);
                warn!(personality = %personality_id, error = %e, "generation failed: {kind}");
                Err(kind)
            }
        }
    }

    /// Like [`generate`](Self::generate) but always yields display text:
    /// failures become their fixed user-facing message.
    pub async fn respond(&self, personality_id: &str, text: &str) -> String {
        match self.generate(personality_id, text).await {
            Ok(reply) => reply,
            Err(e) => e.user_message().to_string(),
        }
    }

    pub fn clear_session(&self, personality_id: &str) -> bool {
        self.sessions.clear(personality_id)
    }

    pub fn clear_all_sessions(&self) {
        self.sessions.clear_all();
    }
}
