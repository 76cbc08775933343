//! # InputBox Component
//!
//! Owns the draft the user is typing and decides when it may be submitted.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and line-relative editing
//! - Turn Enter into a submission and Shift+Enter into a newline
//! - Refuse submission when the draft is blank or a reply is pending
//! - Grow with the draft up to `MAX_VISIBLE_LINES`, then scroll internally
//!
//! ## State Management
//!
//! The draft buffer is internal state. `disabled` is a prop mirroring the
//! container's awaiting flag; `palette` follows the theme. Cursor position
//! and scroll state are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use cursor::CursorState;
use text_wrap::{
    CONTENT_PAD_H, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, line_end, line_start,
    next_char_boundary, prev_char_boundary, wrap_line_count, wrap_options,
};

pub const PLACEHOLDER: &str = "Type your medical question here...";
pub const HINT: &str = "Enter to send • Shift+Enter for new line";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The trimmed draft, ready to send
    Submit(String),
    /// Draft text or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `disabled`: true while a reply is pending; editing and submit are refused
/// - `palette`: current theme colours
///
/// # State
///
/// - `buffer`: the draft
/// - `cursor`: cursor position and scroll offset (see `CursorState`)
pub struct InputBox {
    /// Draft text (Internal State)
    pub buffer: String,
    /// Awaiting a reply (Prop)
    pub disabled: bool,
    /// Theme colours (Prop)
    pub palette: Palette,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            palette,
            cursor: CursorState::new(),
        }
    }

    /// Whether Enter would currently submit.
    pub fn can_submit(&self) -> bool {
        !self.disabled && !self.buffer.trim().is_empty()
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    /// Returns value in range [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let content_lines = wrap_line_count(&self.buffer, inner_width(content_width));
        content_lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// The wrapped lines currently inside the viewport.
    fn visible_lines(&self, content_width: u16) -> Vec<String> {
        let width = inner_width(content_width);
        if width == 0 {
            return Vec::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].iter().map(|l| l.to_string()).collect()
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    /// Render scrollbar when content exceeds visible area
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total_lines = wrap_line_count(&self.buffer, inner_width(area.width));
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // content_length is the max scroll position, not the line count
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let border_style = if self.disabled {
            self.palette.input_disabled
        } else {
            self.palette.input_border
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_bottom(Line::styled(HINT, self.palette.muted).centered())
            .style(self.palette.base)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Line::styled(PLACEHOLDER, self.palette.muted))
        } else {
            let style = if self.disabled {
                self.palette.input_disabled
            } else {
                self.palette.input_text
            };
            let lines: Vec<Line> = self
                .visible_lines(area.width)
                .into_iter()
                .map(Line::from)
                .collect();
            Paragraph::new(lines).style(style)
        };

        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area);

        if !self.disabled {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // A pending reply freezes the draft, like a disabled textarea
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Newline => self.insert("\n"),
            TuiEvent::Paste(text) => {
                // Terminals send CR for line breaks inside bracketed paste
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&text)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let start = line_start(&self.buffer, self.cursor.pos);
                (self.cursor.pos != start).then(|| {
                    self.cursor.pos = start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let end = line_end(&self.buffer, self.cursor.pos);
                (self.cursor.pos != end).then(|| {
                    self.cursor.pos = end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if !self.can_submit() {
                    return None;
                }
                let text = self.buffer.trim().to_string();
                self.buffer.clear();
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input() -> InputBox {
        InputBox::new(Palette::for_theme(Theme::Light))
    }

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn screen_text(input: &mut InputBox, width: u16) -> String {
        let height = input.calculate_height(width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = input();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn submit_emits_trimmed_draft_and_clears() {
        let mut input = input();
        type_str(&mut input, "  chest pain?  ");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("chest pain?".to_string())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn blank_draft_is_not_submitted() {
        let mut input = input();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);

        type_str(&mut input, "   ");
        input.handle_event(&TuiEvent::Newline);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   \n");
    }

    #[test]
    fn disabled_refuses_submit_and_edits() {
        let mut input = input();
        type_str(&mut input, "second question");
        input.disabled = true;

        assert!(!input.can_submit());
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.buffer, "second question");

        input.disabled = false;
        assert!(input.can_submit());
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("second question".to_string()))
        );
    }

    #[test]
    fn submit_follows_can_submit() {
        let mut input = input();
        for draft in ["", "   ", "\n\t", " ok "] {
            input.buffer = draft.to_string();
            input.cursor.pos = draft.len();
            let allowed = input.can_submit();
            let submitted = input.handle_event(&TuiEvent::Submit).is_some();
            assert_eq!(allowed, submitted, "draft {draft:?}");
        }
    }

    #[test]
    fn newline_inserts_instead_of_submitting() {
        let mut input = input();
        type_str(&mut input, "line one");
        let res = input.handle_event(&TuiEvent::Newline);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        type_str(&mut input, "line two");
        assert_eq!(input.buffer, "line one\nline two");

        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("line one\nline two".to_string()))
        );
    }

    #[test]
    fn paste_normalizes_carriage_returns() {
        let mut input = input();
        input.handle_event(&TuiEvent::Paste("a\r\nb\rc".to_string()));
        assert_eq!(input.buffer, "a\nb\nc");
    }

    #[test]
    fn cursor_editing_in_the_middle() {
        let mut input = input();
        type_str(&mut input, "helo");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('l'));
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ello");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "ello!");
    }

    #[test]
    fn home_end_at_bounds_are_noops() {
        let mut input = input();
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), None);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn height_grows_then_caps() {
        let mut input = input();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);

        input.buffer = "a\nb\nc".to_string();
        assert_eq!(input.calculate_height(40), 3 + VERTICAL_OVERHEAD);

        input.buffer = "1\n2\n3\n4\n5\n6\n7\n8".to_string();
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn empty_draft_shows_placeholder_and_hint() {
        let text = screen_text(&mut input(), 60);
        assert!(text.contains("Type your medical question here..."));
        assert!(text.contains("Enter to send"));
    }

    #[test]
    fn draft_replaces_placeholder() {
        let mut input = input();
        type_str(&mut input, "Is aspirin safe?");
        let text = screen_text(&mut input, 60);
        assert!(text.contains("Is aspirin safe?"));
        assert!(!text.contains("Type your medical question"));
    }
}
