use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Submit,
    ToggleTheme, // Ctrl+T

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Newline,       // Shift+Enter, Alt+Enter or Ctrl+J
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Map a raw crossterm event to a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    let mods = key_event.modifiers;
    match key_event.code {
        KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::Quit),
        KeyCode::Char('t') if mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ToggleTheme),
        // Ctrl+J is ASCII LF; what many terminals send for Ctrl+Enter
        KeyCode::Char('j') if mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::Newline),
        KeyCode::Enter if mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Some(TuiEvent::Newline)
        }
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Char(c) if !mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::InputChar(c)),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End if mods.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ScrollToBottom),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        KeyCode::Esc => Some(TuiEvent::Quit),
        _ => None,
    }
}
