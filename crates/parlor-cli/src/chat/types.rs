use parlor_core::{ChatMessage, Sender, Ticket};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

// ── focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    Sidebar,
    Chat,
}

impl Focus {
    pub(super) fn toggled(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Chat,
            Focus::Chat => Focus::Sidebar,
        }
    }
}

// ── status line ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub(super) fn to_line(&self) -> Line<'static> {
        match self {
            Notice::Info(t) => Line::from(Span::styled(
                format!(" {t}"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Notice::Error(t) => Line::from(vec![
                Span::styled(" error ", Style::default().fg(Color::White).bg(Color::Red)),
                Span::raw(" "),
                Span::styled(t.clone(), Style::default().fg(Color::Red)),
            ]),
        }
    }
}

// ── what the event loop must do after a key ──────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Action {
    None,
    Quit,
    /// Run the generator for this request in the background.
    Dispatch(parlor_core::PendingRequest),
    /// Drop the model session of one personality.
    ClearSession(String),
    ResetSessions,
}

// ── display events from background task ─────────────────────────────────────

pub(super) enum DisplayEvent {
    Reply { ticket: Ticket, text: String },
}

// ── transcript rendering ─────────────────────────────────────────────────────

pub(super) fn message_lines(msg: &ChatMessage, ai_label: &str) -> Vec<Line<'static>> {
    let stamp = Span::styled(
        format!("  {}", msg.time_label()),
        Style::default().fg(Color::DarkGray),
    );
    let mut lines = match msg.sender() {
        Sender::User => vec![Line::from(vec![
            Span::styled(
                " you ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            stamp,
        ])],
        Sender::Ai => vec![Line::from(vec![
            Span::styled(
                format!(" {ai_label} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            stamp,
        ])],
    };
    let color = match msg.sender() {
        Sender::User => Color::Cyan,
        Sender::Ai => Color::White,
    };
    for l in msg.content().lines() {
        lines.push(Line::from(Span::styled(
            format!("  {l}"),
            Style::default().fg(color),
        )));
    }
    if let Some(att) = msg.attachment() {
        lines.push(Line::from(Span::styled(
            format!("  📎 {}", att.name),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::raw(""));
    lines
}
