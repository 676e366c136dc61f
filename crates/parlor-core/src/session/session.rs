use crate::catalog::PersonalityConfig;
use crate::providers::{GenerationParams, LlmProvider, LlmResponse, Message, ProviderError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Model turn seeded after the system prompt in every new session.
pub const ACKNOWLEDGEMENT: &str = "I understand and will respond accordingly.";

pub type SharedSession = Arc<tokio::sync::Mutex<ChatSession>>;

// ── ChatSession ───────────────────────────────────────────────────────────────

/// Running conversation with the model on behalf of one personality.
#[derive(Debug)]
pub struct ChatSession {
    personality_id: String,
    history: Vec<Message>,
    params: GenerationParams,
}

impl ChatSession {
    /// Start a conversation primed with the personality's brief and a canned
    /// acknowledgement from the model.
    pub fn new(personality_id: &str, config: &PersonalityConfig, max_output_tokens: u32) -> Self {
        Self {
            personality_id: personality_id.to_string(),
            history: vec![
                Message::user(&config.system_prompt),
                Message::model(ACKNOWLEDGEMENT),
            ],
            params: config.generation_params(max_output_tokens),
        }
    }

    pub fn personality_id(&self) -> &str {
        &self.personality_id
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Number of completed user/model exchanges, not counting the seed.
    pub fn exchanges(&self) -> usize {
        self.history.len().saturating_sub(2) / 2
    }

    /// Send `text` with the full history as context.
    ///
    /// History only grows when the call succeeds, so a failed send leaves the
    /// session exactly as it was.
    pub async fn send(
        &mut self,
        provider: &dyn LlmProvider,
        text: &str,
    ) -> Result<LlmResponse, ProviderError> {
        let mut outgoing = self.history.clone();
        outgoing.push(Message::user(text));

        debug!(personality = %self.personality_id, turns = outgoing.len(), "sending");
        let resp = provider.complete(&outgoing, &self.params).await?;

        outgoing.push(Message::model(&resp.content));
        self.history = outgoing;
        Ok(resp)
    }
}

// ── SessionStore ──────────────────────────────────────────────────────────────

/// In-memory map from personality id to its live session.
///
/// Owned by the application and handed to whoever needs it; there is no
/// process-wide instance. Sessions never expire and are never written to disk.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, SharedSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, personality_id: &str) -> Option<SharedSession> {
        self.map().get(personality_id).cloned()
    }

    /// Create a fresh session, replacing any existing one for the id.
    pub fn create(
        &self,
        personality_id: &str,
        config: &PersonalityConfig,
        max_output_tokens: u32,
    ) -> SharedSession {
        let session = Arc::new(tokio::sync::Mutex::new(ChatSession::new(
            personality_id,
            config,
            max_output_tokens,
        )));
        self.map()
            .insert(personality_id.to_string(), Arc::clone(&session));
        info!(personality = %personality_id, "session created");
        session
    }

    /// Return the existing session for the id, creating it on first use.
    pub fn get_or_create(
        &self,
        personality_id: &str,
        config: &PersonalityConfig,
        max_output_tokens: u32,
    ) -> SharedSession {
        let mut map = self.map();
        if let Some(existing) = map.get(personality_id) {
            return Arc::clone(existing);
        }
        let session = Arc::new(tokio::sync::Mutex::new(ChatSession::new(
            personality_id,
            config,
            max_output_tokens,
        )));
        map.insert(personality_id.to_string(), Arc::clone(&session));
        info!(personality = %personality_id, "session created");
        session
    }

    /// Drop the session for one personality. Returns whether one existed.
    pub fn clear(&self, personality_id: &str) -> bool {
        let removed = self.map().remove(personality_id).is_some();
        if removed {
            info!(personality = %personality_id, "session cleared");
        }
        removed
    }

    pub fn clear_all(&self) {
        let mut map = self.map();
        let n = map.len();
        map.clear();
        info!(count = n, "all sessions cleared");
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
