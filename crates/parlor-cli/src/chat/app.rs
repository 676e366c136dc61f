use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parlor_core::chat::Attachment;
use parlor_core::{Catalog, ChatView, Personality, Sidebar, Ticket};

use super::commands::{self, SlashCommand};
use super::types::{Action, Focus, Notice};

// ── app state ────────────────────────────────────────────────────────────────

pub(super) struct App {
    pub(super) catalog: Arc<Catalog>,
    pub(super) sidebar: Sidebar,
    pub(super) view: ChatView,
    pub(super) focus: Focus,
    pub(super) scroll: u16,
    pub(super) auto_scroll: bool,
    pub(super) spin_i: usize,
    pub(super) notice: Option<Notice>,
}

impl App {
    pub(super) fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            sidebar: Sidebar::new(),
            view: ChatView::new(),
            focus: Focus::Sidebar,
            scroll: 0,
            auto_scroll: true,
            spin_i: 0,
            notice: None,
        }
    }

    pub(super) fn selected(&self) -> Option<&Personality> {
        self.view
            .personality_id()
            .and_then(|id| self.catalog.get(id))
    }

    /// Bind the chat to `id`. Unknown ids are ignored.
    pub(super) fn select(&mut self, id: &str) -> bool {
        if !self.sidebar.select_id(&self.catalog, id) {
            return false;
        }
        self.view.select(id);
        self.scroll = 0;
        self.auto_scroll = true;
        self.notice = None;
        self.focus = Focus::Chat;
        true
    }

    /// Deliver a finished reply. Stale replies are dropped by the view.
    pub(super) fn on_reply(&mut self, ticket: Ticket, text: String) {
        if self.view.resolve(ticket, text) && self.auto_scroll {
            self.scroll = u16::MAX;
        }
    }

    pub(super) fn on_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            self.focus = self.focus.toggled();
            return Action::None;
        }
        match self.focus {
            Focus::Sidebar => self.on_sidebar_key(key),
            Focus::Chat => self.on_chat_key(key),
        }
    }

    fn on_sidebar_key(&mut self, key: KeyEvent) -> Action {
        let catalog = Arc::clone(&self.catalog);
        match key.code {
            KeyCode::Up => self.sidebar.move_up(),
            KeyCode::Down => self.sidebar.move_down(&catalog),
            KeyCode::Enter => {
                if let Some(id) = self.sidebar.select_current(&catalog) {
                    self.select(&id);
                }
            }
            KeyCode::Backspace => self.sidebar.pop_char(&catalog),
            KeyCode::Esc => self.sidebar.set_query(&catalog, ""),
            KeyCode::Char(c) => self.sidebar.push_char(&catalog, c),
            _ => {}
        }
        Action::None
    }

    fn on_chat_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) => self.view.insert_char(c),
            KeyCode::Backspace => self.view.backspace(),
            KeyCode::Left => self.view.cursor_left(),
            KeyCode::Right => self.view.cursor_right(),
            KeyCode::Home => self.view.cursor_home(),
            KeyCode::End => self.view.cursor_end(),
            KeyCode::Up => {
                self.auto_scroll = false;
                self.scroll = self.scroll.saturating_sub(3);
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(3);
            }
            KeyCode::PageUp => {
                self.auto_scroll = false;
                self.scroll = self.scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
            }
            _ => {}
        }
        Action::None
    }

    fn submit(&mut self) -> Action {
        if let Some(parsed) = commands::parse(self.view.input()) {
            self.view.set_input("");
            return match parsed {
                Ok(cmd) => self.run_command(cmd),
                Err(usage) => {
                    self.notice = Some(Notice::Error(usage));
                    Action::None
                }
            };
        }

        if self.view.personality_id().is_none() {
            self.notice = Some(Notice::Info(
                "pick someone from the sidebar first (tab to switch)".into(),
            ));
            return Action::None;
        }
        match self.view.submit() {
            Some(req) => {
                self.notice = None;
                self.auto_scroll = true;
                self.scroll = u16::MAX;
                Action::Dispatch(req)
            }
            None => Action::None,
        }
    }

    fn run_command(&mut self, cmd: SlashCommand) -> Action {
        let catalog = Arc::clone(&self.catalog);
        match cmd {
            SlashCommand::Quit => Action::Quit,
            SlashCommand::Help => {
                self.notice = Some(Notice::Info(commands::help_text()));
                Action::None
            }
            SlashCommand::Clear => match self.view.personality_id().map(str::to_string) {
                Some(id) => {
                    self.view.clear_messages();
                    self.notice = Some(Notice::Info("conversation cleared".into()));
                    Action::ClearSession(id)
                }
                None => Action::None,
            },
            SlashCommand::Reset => {
                self.view.clear_messages();
                self.notice = Some(Notice::Info("all conversations forgotten".into()));
                Action::ResetSessions
            }
            SlashCommand::Category(category) => {
                self.sidebar.set_category(&catalog, category);
                let label = category.map(|c| c.to_string()).unwrap_or_else(|| "all".into());
                self.notice = Some(Notice::Info(format!("category: {label}")));
                Action::None
            }
            SlashCommand::Attach(path) => {
                match Attachment::from_path(&path) {
                    Ok(att) => {
                        self.notice = Some(Notice::Info(format!("attached {}", att.name)));
                        self.view.stage_attachment(att);
                    }
                    Err(e) => self.notice = Some(Notice::Error(e.to_string())),
                }
                Action::None
            }
        }
    }
}
