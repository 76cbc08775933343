//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Flow
//!
//! Enter in the input box becomes `Action::Submit`. `update()` appends the
//! user message and answers with `Effect::SpawnRequest`; the loop hands the
//! text to a tokio task which calls the backend and sends exactly one
//! `ResponseReceived` or `RequestFailed` back over the action channel.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (typing indicator visible): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or a
//!   backend completion.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{ChatBackend, FormPostBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Header, HeaderEvent, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub header: Header,
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub disclaimer_threshold: usize,
    // Typing indicator animation tick
    pub frame_index: usize,
}

impl TuiState {
    pub fn new(app: &App, disclaimer_threshold: usize) -> Self {
        Self {
            header: Header::new(app.theme),
            message_list: MessageListState::new(),
            input_box: InputBox::new(Palette::for_theme(app.theme)),
            disclaimer_threshold,
            frame_index: 0,
        }
    }

    /// Push App-derived props into the components before drawing.
    pub fn sync(&mut self, app: &App) {
        if self.header.theme != app.theme {
            self.header = Header::new(app.theme);
        }
        self.input_box.palette = self.header.palette;
        self.input_box.disabled = app.awaiting_response;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter;
        // terminals without it simply ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs `restore` when dropped, so every exit from `run` leaves raw mode.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Build the backend described by the resolved config.
pub fn build_backend(config: &ResolvedConfig) -> std::io::Result<Arc<dyn ChatBackend>> {
    match FormPostBackend::from_config(config) {
        Ok(backend) => {
            info!("Using backend {} at {}", backend.name(), backend.endpoint());
            Ok(Arc::new(backend))
        }
        Err(e) => {
            warn!("Could not build backend: {}", e);
            Err(std::io::Error::other(e))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config)?;
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app, config.disclaimer_threshold);

    let mut terminal = ratatui::init();
    let _restore_guard = RestoreGuard {
        restore: ratatui::restore,
    };
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        tui.sync(&app);

        let animating = app.awaiting_response;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.frame_index = (start_time.elapsed().as_millis() / 80) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match handle_event(&mut app, &mut tui, &event) {
                Effect::Quit => break 'outer,
                Effect::SpawnRequest(text) => spawn_request(backend.clone(), text, tx.clone()),
                Effect::None => {}
            }
        }

        // Backend completions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'outer;
            }
        }
    }

    info!("Shutting down with {} messages in the log", app.messages().len());
    Ok(())
}

/// Route one terminal event to the component that owns it.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit => update(app, Action::Quit),
        TuiEvent::ToggleTheme => match tui.header.handle_event(event) {
            Some(HeaderEvent::ToggleTheme) => {
                let effect = update(app, Action::ToggleTheme);
                tui.sync(app);
                effect
            }
            None => Effect::None,
        },
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            Effect::None
        }
        _ => match tui.input_box.handle_event(event) {
            Some(InputEvent::Submit(text)) => {
                let effect = update(app, Action::Submit(text));
                // Disable the input before the next key arrives in this batch
                tui.sync(app);
                effect
            }
            Some(InputEvent::ContentChanged) | None => Effect::None,
        },
    }
}

fn spawn_request(backend: Arc<dyn ChatBackend>, text: String, tx: mpsc::Sender<Action>) {
    info!("Spawning request to {}", backend.name());
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = backend.send(&text).await;
        debug!(
            "Backend call finished in {:?} (ok={})",
            started.elapsed(),
            outcome.is_ok()
        );
        if tx.send(Action::from_outcome(outcome)).is_err() {
            warn!("Failed to deliver backend outcome: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{APOLOGY, Author};
    use crate::core::state::Theme;
    use crate::test_support::StubBackend;

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, &TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn enter_submits_and_locks_input() {
        let mut app = App::new();
        let mut tui = TuiState::new(&app, 100);
        type_text(&mut app, &mut tui, "  chest pain  ");

        let effect = handle_event(&mut app, &mut tui, &TuiEvent::Submit);

        assert_eq!(effect, Effect::SpawnRequest("chest pain".into()));
        assert_eq!(app.messages()[0].text(), "chest pain");
        assert!(tui.input_box.buffer.is_empty());
        assert!(tui.input_box.disabled);

        // Typing and a second Enter are both refused while awaiting
        type_text(&mut app, &mut tui, "again");
        assert!(tui.input_box.buffer.is_empty());
        assert_eq!(
            handle_event(&mut app, &mut tui, &TuiEvent::Submit),
            Effect::None
        );
        assert_eq!(app.messages().len(), 1);
    }

    #[test]
    fn blank_draft_does_not_submit() {
        let mut app = App::new();
        let mut tui = TuiState::new(&app, 100);
        type_text(&mut app, &mut tui, "   ");
        handle_event(&mut app, &mut tui, &TuiEvent::Newline);

        assert_eq!(
            handle_event(&mut app, &mut tui, &TuiEvent::Submit),
            Effect::None
        );
        assert!(app.messages().is_empty());
    }

    #[test]
    fn ctrl_t_toggles_theme_everywhere() {
        let mut app = App::new();
        let mut tui = TuiState::new(&app, 100);
        handle_event(&mut app, &mut tui, &TuiEvent::ToggleTheme);

        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(tui.header.theme, Theme::Dark);
        assert_eq!(tui.input_box.palette, Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn restore_guard_runs_on_error_return() {
        let restored = std::cell::Cell::new(false);
        let failing_draw = || -> std::io::Result<()> {
            let _restore_guard = RestoreGuard {
                restore: || restored.set(true),
            };
            Err::<(), _>(std::io::Error::other("draw failed"))?;
            Ok(())
        };

        assert!(failing_draw().is_err());
        assert!(restored.get());
    }

    #[test]
    fn quit_event_requests_quit() {
        let mut app = App::new();
        let mut tui = TuiState::new(&app, 100);
        assert_eq!(
            handle_event(&mut app, &mut tui, &TuiEvent::Quit),
            Effect::Quit
        );
    }

    #[test]
    fn failed_backend_outcome_becomes_apology() {
        let mut app = App::new();
        update(&mut app, Action::Submit("hello".into()));

        let backend = StubBackend::failing();
        let outcome = tokio_test::block_on(backend.send("hello"));
        update(&mut app, Action::from_outcome(outcome));

        let reply = &app.messages()[1];
        assert_eq!(reply.author(), Author::Assistant);
        assert!(reply.is_error());
        assert_eq!(reply.text(), APOLOGY);
        assert_eq!(*backend.asked.lock().unwrap(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn spawned_request_reports_exactly_once() {
        let backend: Arc<dyn ChatBackend> = Arc::new(StubBackend::replying("Rest and fluids."));
        let (tx, rx) = mpsc::channel();

        spawn_request(backend, "flu?".into(), tx);

        let action = tokio::task::spawn_blocking(move || {
            let first = rx.recv_timeout(Duration::from_secs(2)).ok();
            // Sender is dropped once the task finishes
            let second = rx.recv_timeout(Duration::from_secs(2)).ok();
            (first, second)
        })
        .await
        .unwrap();

        assert_eq!(
            action.0,
            Some(Action::ResponseReceived("Rest and fluids.".into()))
        );
        assert_eq!(action.1, None);
    }
}
