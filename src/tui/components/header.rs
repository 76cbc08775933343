//! # Header Component
//!
//! Top bar with the assistant's name, an online marker, and the theme toggle.
//!
//! The header is stateless: the theme it displays is a prop, and pressing
//! the toggle only emits `HeaderEvent::ToggleTheme`. The container flips the
//! flag and every component is redrawn with the new palette on the next
//! frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::state::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

pub const HEADER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    ToggleTheme,
}

pub struct Header {
    pub theme: Theme,
    pub palette: Palette,
}

impl Header {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            palette: Palette::for_theme(theme),
        }
    }

    /// Text of the toggle, naming the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.theme {
            Theme::Light => "☾ Dark mode (Ctrl+T)",
            Theme::Dark => "☀ Light mode (Ctrl+T)",
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Block::default().style(self.palette.header_accent), area);

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);

        let title = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(" ● ", self.palette.online),
                Span::styled("Medical Assistant", self.palette.header),
            ]),
            Line::from(vec![
                Span::styled("   ● ", self.palette.online),
                Span::styled("Always here to help", self.palette.header_accent),
            ]),
        ])
        .block(Block::default().padding(Padding::top(
            area.height.saturating_sub(2) / 2,
        )));
        frame.render_widget(title, left);

        let toggle = Paragraph::new(Line::styled(self.toggle_label(), self.palette.header_accent))
            .right_aligned()
            .block(Block::default().padding(Padding::new(
                0,
                1,
                area.height.saturating_sub(1) / 2,
                0,
            )));
        frame.render_widget(toggle, right);
    }
}

impl EventHandler for Header {
    type Event = HeaderEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ToggleTheme => Some(HeaderEvent::ToggleTheme),
            _ => None,
        }
    }
}
