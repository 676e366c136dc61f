use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::commands::slash_suggestions;
use super::types::{message_lines, Focus};

pub(super) const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(super) const PARLOR_GOLD: Color = Color::Rgb(230, 180, 60);

const SIDEBAR_WIDTH: u16 = 34;

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(PARLOR_GOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(super) fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(app, frame, cols[0]);
    render_chat(app, frame, cols[1]);
}

// ── sidebar ──────────────────────────────────────────────────────────────────

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let query = app.sidebar.query();
    let search = if query.is_empty() && !focused {
        Line::from(Span::styled("search…", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled(query.to_string(), Style::default().fg(Color::White)),
            Span::styled(
                if focused { " " } else { "" },
                Style::default().bg(Color::White),
            ),
        ])
    };
    let search_widget = Paragraph::new(search).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border(focused))
            .title(Span::styled(" search ", border(focused))),
    );
    frame.render_widget(search_widget, rows[0]);

    let visible = app.sidebar.visible(&app.catalog);
    let mut lines: Vec<Line> = Vec::new();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nobody matches",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for (i, p) in visible.iter().enumerate() {
        let highlighted = focused && i == app.sidebar.cursor();
        let is_selected = app.sidebar.selected() == Some(p.id.as_str());
        let dot = if p.is_online() { "●" } else { "○" };
        let dot_col = if p.is_online() { Color::Green } else { Color::DarkGray };
        let name_style = if highlighted {
            Style::default()
                .fg(Color::Black)
                .bg(PARLOR_GOLD)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default()
                .fg(PARLOR_GOLD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {dot} "), Style::default().fg(dot_col)),
            Span::styled(p.name.clone(), name_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", p.description),
            Style::default().fg(Color::Gray),
        )));
        if let Some(ref teaser) = p.last_message {
            lines.push(Line::from(Span::styled(
                format!("   “{teaser}”"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::raw(""));
    }

    let title = match app.sidebar.category() {
        Some(c) => format!(" personalities · {c} "),
        None => " personalities ".to_string(),
    };
    let list = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border(focused))
                .title(Span::styled(title, border(focused))),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(list, rows[1]);
}

// ── chat pane ────────────────────────────────────────────────────────────────

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Chat;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(1),    // messages
            Constraint::Length(3), // input
            Constraint::Length(1), // status
        ])
        .split(area);

    // header
    let (name, subtitle) = match app.selected() {
        Some(p) => {
            let sub = if app.view.is_typing() {
                Span::styled("typing...", Style::default().fg(Color::Green))
            } else {
                Span::styled(p.description.clone(), Style::default().fg(Color::Gray))
            };
            (p.name.clone(), sub)
        }
        None => (
            "parlor".to_string(),
            Span::styled(
                "choose someone to talk to",
                Style::default().fg(Color::DarkGray),
            ),
        ),
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {name}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![Span::raw(" "), subtitle]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PARLOR_GOLD))
            .title(Span::styled(
                " parlor ",
                Style::default()
                    .fg(PARLOR_GOLD)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(header, rows[0]);

    // messages
    let ai_label = app
        .selected()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "ai".into());
    let mut lines: Vec<Line> = vec![Line::raw("")];
    for msg in app.view.messages() {
        lines.extend(message_lines(msg, &ai_label));
    }
    if app.view.is_typing() {
        lines.push(Line::from(Span::styled(
            format!("  {} {ai_label} is typing…", SPINNER[app.spin_i % SPINNER.len()]),
            Style::default().fg(Color::Green),
        )));
    }

    let total = lines.len() as u16;
    let view_h = rows[1].height.saturating_sub(2);
    let max_scroll = total.saturating_sub(view_h);
    if app.scroll == u16::MAX || app.auto_scroll {
        app.scroll = max_scroll;
    }
    app.scroll = app.scroll.min(max_scroll);
    if app.scroll == max_scroll {
        app.auto_scroll = true;
    }

    let msg_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((app.scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(msg_widget, rows[1]);

    // input
    let busy = app.view.is_typing();
    let border_col = if busy || !focused {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let input = app.view.input();
    let cursor = app.view.cursor();
    let before = &input[..cursor];
    let (cur_ch, after) = match input[cursor..].chars().next() {
        Some(ch) => (ch.to_string(), input[cursor + ch.len_utf8()..].to_string()),
        None => (" ".to_string(), String::new()),
    };
    let mut spans = vec![Span::styled(
        before.to_string(),
        Style::default().fg(Color::White),
    )];
    if focused {
        spans.push(Span::styled(
            cur_ch,
            Style::default().fg(Color::Black).bg(Color::White),
        ));
    } else {
        spans.push(Span::styled(cur_ch, Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(after, Style::default().fg(Color::White)));

    let title = match app.view.staged_attachment() {
        Some(att) => format!(" message · 📎 {} ", att.name),
        None => " message ".to_string(),
    };
    let input_widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_col))
            .title(Span::styled(title, Style::default().fg(border_col))),
    );
    frame.render_widget(input_widget, rows[2]);

    // status
    let status = match app.notice {
        Some(ref n) => n.to_line(),
        None => Line::from(Span::styled(
            " tab: switch pane  enter: send  /help: commands  ctrl+c: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), rows[3]);

    // suggestion popup while typing a command
    if focused && input.starts_with('/') {
        let suggestions = slash_suggestions(input);
        if !suggestions.is_empty() {
            let pop_h = suggestions.len() as u16 + 2;
            let pop_w = 72u16.min(rows[2].width);
            let pop_rect = Rect::new(
                rows[2].x + 1,
                rows[2].y.saturating_sub(pop_h),
                pop_w,
                pop_h,
            );
            let lines: Vec<Line> = suggestions
                .iter()
                .map(|(cmd, desc)| {
                    Line::from(vec![
                        Span::styled(format!(" {:<10}", cmd), Style::default().fg(Color::White)),
                        Span::styled(format!(" {}", desc), Style::default().fg(Color::DarkGray)),
                    ])
                })
                .collect();
            let popup = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(Span::styled(" commands ", Style::default().fg(Color::Cyan))),
            );
            frame.render_widget(Clear, pop_rect);
            frame.render_widget(popup, pop_rect);
        }
    }
}
