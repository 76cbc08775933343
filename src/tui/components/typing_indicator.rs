use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::tui::theme::Palette;

pub const TYPING_HEIGHT: u16 = 3;
const DOTS: usize = 3;
const LABEL: &str = "Medical Assistant";

/// Placeholder bubble shown after the last message while a reply is pending.
///
/// `frame` advances every tick; one of the three dots is lit at a time.
pub struct TypingIndicator {
    pub palette: Palette,
    pub frame: usize,
}

impl TypingIndicator {
    fn lit_dot(&self) -> usize {
        // ~4 ticks per dot at the animation frame rate
        (self.frame / 4) % DOTS
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lit = self.lit_dot();
        let mut spans: Vec<Span> = (0..DOTS)
            .map(|i| {
                let style = if i == lit {
                    self.palette.accent
                } else {
                    self.palette.muted
                };
                Span::styled("● ", style)
            })
            .collect();
        spans.push(Span::styled("typing", self.palette.muted));

        let line = Line::from(spans);
        let width = (line.width().max(LABEL.len()) as u16 + 4).min(area.width);
        let bubble = Rect::new(area.x, area.y, width, TYPING_HEIGHT.min(area.height));

        Paragraph::new(line)
            .style(self.palette.assistant_bubble)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(self.palette.assistant_border)
                    .title(LABEL)
                    .padding(Padding::horizontal(1)),
            )
            .render(bubble, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;

    #[test]
    fn dot_cycles_through_all_positions() {
        let lit: Vec<usize> = (0..12)
            .step_by(4)
            .map(|frame| {
                TypingIndicator {
                    palette: Palette::for_theme(Theme::Light),
                    frame,
                }
                .lit_dot()
            })
            .collect();
        assert_eq!(lit, vec![0, 1, 2]);
    }

    #[test]
    fn renders_typing_label() {
        let area = Rect::new(0, 0, 40, TYPING_HEIGHT);
        let mut buf = Buffer::empty(area);
        TypingIndicator {
            palette: Palette::for_theme(Theme::Dark),
            frame: 0,
        }
        .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("typing"));
    }
}
