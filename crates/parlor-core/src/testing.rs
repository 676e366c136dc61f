//! Test doubles shared by the unit tests.

use crate::providers::{
    GenerationParams, LlmProvider, LlmResponse, Message, ProviderError, TokenUsage,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that replays canned outcomes and records every request.
pub(crate) struct ScriptedProvider {
    configured: bool,
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: Mutex<Vec<(Vec<Message>, GenerationParams)>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self {
            configured: true,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub(crate) fn reply(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub(crate) fn fail(self, err: ProviderError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_call(&self) -> Option<(Vec<Message>, GenerationParams)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), *params));
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()));
        next.map(|content| LlmResponse {
            content,
            usage: TokenUsage::default(),
        })
    }
}
