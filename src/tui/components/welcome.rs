//! # Welcome Panel
//!
//! Fills the message area while the conversation is empty: greeting,
//! medical disclaimer, and a grid of example topics.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

const INTRO: &str = "Ask me anything about medical conditions, symptoms, treatments, \
or general health advice. I'm here to help!";

const DISCLAIMER: &str = "This AI assistant provides general health information only. \
Always consult qualified healthcare professionals for medical advice, diagnosis, or treatment.";

/// (title, blurb) for each suggestion card.
pub const TOPICS: [(&str, &str); 4] = [
    ("Medications", "Ask about drug interactions and side effects"),
    ("Symptoms", "Understand various medical symptoms"),
    ("Conditions", "Learn about different health conditions"),
    ("Advice", "Get general health and wellness tips"),
];

const MAX_WIDTH: u16 = 72;
const CARD_HEIGHT: u16 = 4;

pub struct WelcomePanel {
    pub palette: Palette,
}

impl WelcomePanel {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, title: &str, blurb: &str) {
        let card = Paragraph::new(vec![
            Line::styled(title, self.palette.accent),
            Line::styled(blurb, self.palette.muted),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(self.palette.assistant_border)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(card, area);
    }
}

impl Component for WelcomePanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [column] = Layout::horizontal([Constraint::Max(MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        // Card grid collapses to one column on narrow terminals
        let two_columns = column.width >= 48;
        let grid_height = if two_columns {
            CARD_HEIGHT * 2
        } else {
            CARD_HEIGHT * TOPICS.len() as u16
        };

        let [title_area, intro_area, disclaimer_area, grid_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(grid_height),
        ])
        .flex(Flex::Center)
        .areas(column);

        let title = Paragraph::new(Line::styled(
            "Welcome to Your Medical Assistant",
            self.palette.accent.add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(title, title_area);

        let intro = Paragraph::new(INTRO)
            .style(self.palette.base)
            .centered()
            .wrap(Wrap { trim: true });
        frame.render_widget(intro, intro_area);

        let disclaimer = Paragraph::new(Line::from(vec![
            Span::styled(
                "Medical Disclaimer: ",
                self.palette.warning_box.add_modifier(Modifier::BOLD),
            ),
            Span::styled(DISCLAIMER, self.palette.warning_box),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_style(self.palette.warning_box)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(disclaimer, disclaimer_area);

        if two_columns {
            let rows = Layout::vertical([Constraint::Length(CARD_HEIGHT); 2]).split(grid_area);
            for (row, pair) in rows.iter().zip(TOPICS.chunks(2)) {
                let cells = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(*row);
                for (cell, (title, blurb)) in cells.iter().zip(pair) {
                    self.render_card(frame, *cell, title, blurb);
                }
            }
        } else {
            let rows = Layout::vertical([Constraint::Length(CARD_HEIGHT); 4])
                .split(grid_area);
            for (row, (title, blurb)) in rows.iter().zip(TOPICS.iter()) {
                self.render_card(frame, *row, title, blurb);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut panel = WelcomePanel::new(Palette::for_theme(Theme::Dark));
        terminal.draw(|f| panel.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_greeting_disclaimer_and_topics() {
        let text = render(80, 30);
        assert!(text.contains("Welcome to Your Medical Assistant"));
        assert!(text.contains("Medical Disclaimer"));
        for (title, _) in TOPICS {
            assert!(text.contains(title), "missing topic {title}");
        }
    }

    #[test]
    fn narrow_terminal_does_not_panic() {
        render(30, 10);
    }
}
