use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parlor_core::ResponseGenerator;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::app::App;
use super::render::render;
use super::types::{Action, DisplayEvent};

// ── main entry ───────────────────────────────────────────────────────────────

pub async fn run(generator: Arc<ResponseGenerator>, initial: Option<String>) -> Result<()> {
    let mut app = App::new(Arc::clone(generator.catalog()));
    if let Some(ref id) = initial {
        app.select(id);
    }

    // Restore the terminal on panic, otherwise the shell is left in raw mode.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    // Keyboard reader thread
    let (key_tx, mut key_rx) = mpsc::channel::<Event>(32);
    tokio::task::spawn_blocking(move || loop {
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if key_tx.blocking_send(ev).is_err() {
                    break;
                }
            }
        }
    });

    let (reply_tx, mut reply_rx) = mpsc::channel::<DisplayEvent>(16);
    info!(provider = generator.provider_name(), "chat started");

    let result = async {
        'main: loop {
            terminal.draw(|f| render(&mut app, f))?;

            tokio::select! {
                // ── keyboard ──
                key = key_rx.recv() => {
                    let Some(ev) = key else { break };
                    let Event::Key(key) = ev else { continue 'main };
                    if key.kind != KeyEventKind::Press { continue 'main; }

                    match app.on_key(key) {
                        Action::None => {}
                        Action::Quit => break 'main,
                        Action::Dispatch(req) => {
                            let generator = Arc::clone(&generator);
                            let tx = reply_tx.clone();
                            tokio::spawn(async move {
                                let text = generator.respond(&req.personality_id, &req.text).await;
                                let _ = tx
                                    .send(DisplayEvent::Reply { ticket: req.ticket, text })
                                    .await;
                            });
                        }
                        Action::ClearSession(id) => {
                            generator.clear_session(&id);
                        }
                        Action::ResetSessions => {
                            generator.clear_all_sessions();
                        }
                    }
                }

                // ── replies from background tasks ──
                ev = reply_rx.recv() => {
                    if let Some(DisplayEvent::Reply { ticket, text }) = ev {
                        debug!(?ticket, "reply event");
                        app.on_reply(ticket, text);
                    }
                }

                // ── spinner tick ──
                _ = tokio::time::sleep(Duration::from_millis(80)) => {
                    if app.view.is_typing() { app.spin_i += 1; }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    info!("chat closed");
    result
}
