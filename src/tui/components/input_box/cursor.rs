//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the internal scroll offset.
//! Methods take `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use super::text_wrap::{
    MAX_VISIBLE_LINES, TEXT_OFFSET_X, TEXT_OFFSET_Y, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Cursor and scroll state, separated from the text buffer.
#[derive(Debug, Default)]
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First wrapped line shown when the draft exceeds the viewport
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        // textwrap drops the empty line after a trailing newline
        if before.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
            cursor_line += 1;
        }

        cursor_line
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let total_lines = wrap_line_count(buffer, inner_width(content_width));

        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
        self.scroll_offset = self
            .scroll_offset
            .min(total_lines.saturating_sub(MAX_VISIBLE_LINES));
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let origin = (area.x + TEXT_OFFSET_X, area.y + TEXT_OFFSET_Y);
        if width == 0 {
            return origin;
        }

        let line = self.calculate_line(buffer, area.width);

        // Column from the last newline, measured in display cells.
        // textwrap trims trailing spaces, so wrapped line lengths can't be used.
        let before = &buffer[..self.pos];
        let logical = &before[line_start_of(before)..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.width())
            .sum();
        let column = logical.width().saturating_sub(consumed) as u16;

        let visible_line = line.saturating_sub(self.scroll_offset);
        (
            origin.0 + column.min(width),
            origin.1 + visible_line.min(MAX_VISIBLE_LINES - 1),
        )
    }
}

fn line_start_of(text: &str) -> usize {
    text.rfind('\n').map(|i| i + 1).unwrap_or(0)
}
