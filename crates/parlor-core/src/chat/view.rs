use super::message::{Attachment, ChatMessage};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// No personality selected.
    Idle,
    /// Personality selected, nothing in flight.
    Ready,
    /// A reply is being generated.
    Sending,
}

/// Identifies one dispatched request. A ticket only resolves while the
/// personality it was issued under is still the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    epoch: u64,
    seq: u64,
}

/// Work handed to the caller by [`ChatView::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub personality_id: String,
    pub text: String,
}

/// Transcript and composer for the chat pane.
///
/// `Idle → Ready` on selection, `Ready → Sending` on submit, `Sending →
/// Ready` on resolve. Selecting again from any state empties the transcript
/// and invalidates whatever was in flight.
#[derive(Debug)]
pub struct ChatView {
    personality_id: Option<String>,
    messages: Vec<ChatMessage>,
    input: String,
    cursor: usize,
    staged: Option<Attachment>,
    state: ChatState,
    epoch: u64,
    seq: u64,
    in_flight: Option<Ticket>,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            personality_id: None,
            messages: Vec::new(),
            input: String::new(),
            cursor: 0,
            staged: None,
            state: ChatState::Idle,
            epoch: 0,
            seq: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_typing(&self) -> bool {
        self.state == ChatState::Sending
    }

    pub fn personality_id(&self) -> Option<&str> {
        self.personality_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn staged_attachment(&self) -> Option<&Attachment> {
        self.staged.as_ref()
    }

    /// Switch to `personality_id`, dropping the transcript, the draft and any
    /// in-flight request.
    pub fn select(&mut self, personality_id: &str) {
        self.epoch += 1;
        self.personality_id = Some(personality_id.to_string());
        self.messages.clear();
        self.input.clear();
        self.cursor = 0;
        self.staged = None;
        self.in_flight = None;
        self.state = ChatState::Ready;
    }

    /// Empty the transcript of the current personality. Same as selecting it
    /// again; a no-op while idle.
    pub fn clear_messages(&mut self) {
        if let Some(id) = self.personality_id.clone() {
            self.select(&id);
        }
    }

    pub fn stage_attachment(&mut self, attachment: Attachment) {
        self.staged = Some(attachment);
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = self.input.len();
    }

    /// Post the draft. Appends the user message right away and returns the
    /// request to run, or `None` when there is nothing to send (blank draft,
    /// no personality, or a reply already pending).
    pub fn submit(&mut self) -> Option<PendingRequest> {
        if self.state != ChatState::Ready {
            return None;
        }
        let personality_id = self.personality_id.clone()?;
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.messages
            .push(ChatMessage::user(&text, self.staged.take()));
        self.input.clear();
        self.cursor = 0;

        self.seq += 1;
        let ticket = Ticket {
            epoch: self.epoch,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);
        self.state = ChatState::Sending;

        Some(PendingRequest {
            ticket,
            personality_id,
            text,
        })
    }

    /// Deliver the reply for `ticket`. Returns `false` and discards the text
    /// when the ticket is no longer the one in flight.
    pub fn resolve(&mut self, ticket: Ticket, text: impl Into<String>) -> bool {
        if self.state != ChatState::Sending || self.in_flight != Some(ticket) {
            debug!(?ticket, "discarding stale reply");
            return false;
        }
        let floor = self.messages.last().map(|m| m.timestamp());
        self.messages.push(ChatMessage::ai(text, floor));
        self.in_flight = None;
        self.state = ChatState::Ready;
        true
    }

    // ── draft editing ────────────────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let i = self.input[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.drain(i..self.cursor);
            self.cursor = i;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.input[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.len() {
            let n = self.input[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor += n;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.len();
    }
}
