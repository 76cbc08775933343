use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Author, Message};
use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Footer shown under long, successful assistant replies.
pub const DISCLAIMER: &str =
    "This information is for educational purposes. Consult a healthcare provider.";

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top border carries the author, bottom border the timestamp.
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never shrink below this unless the terminal itself is narrower.
const MIN_BUBBLE_WIDTH: u16 = 24;

pub fn author_label(author: Author) -> &'static str {
    match author {
        Author::User => "You",
        Author::Assistant => "Medical Assistant",
    }
}

/// Whether the educational disclaimer is appended under this message.
pub fn shows_disclaimer(message: &Message, threshold: usize) -> bool {
    message.is_assistant() && !message.is_error() && message.text().chars().count() > threshold
}

/// Wrap options shared by height prediction and rendering, so both agree.
pub(crate) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Pre-wrapped geometry of one bubble for a given list width.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleLayout {
    pub width: u16,
    pub height: u16,
    lines: Vec<String>,
    disclaimer: Vec<String>,
}

/// A stateless component that renders one conversation message as a bubble.
///
/// User bubbles hug the right edge and assistant bubbles the left, each
/// capped at three quarters of the available width. Failed round trips use
/// the error palette and never carry the disclaimer.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub palette: Palette,
    pub disclaimer_threshold: usize,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, palette: Palette, disclaimer_threshold: usize) -> Self {
        Self {
            message,
            palette,
            disclaimer_threshold,
        }
    }

    /// Wrap the message for `width` columns without rendering it.
    ///
    /// The list uses this to size its scroll canvas before drawing, and the
    /// widget renders the exact same lines, so predicted and drawn heights match.
    pub fn layout(message: &Message, disclaimer_threshold: usize, width: u16) -> BubbleLayout {
        let max_width = (width.saturating_mul(3) / 4).max(MIN_BUBBLE_WIDTH).min(width);
        let inner_max = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner_max == 0 {
            // Terminal too narrow for borders + padding
            return BubbleLayout {
                width,
                height: 1,
                lines: Vec::new(),
                disclaimer: Vec::new(),
            };
        }

        let lines = wrap_lines(message.text(), inner_max);
        let disclaimer = if shows_disclaimer(message, disclaimer_threshold) {
            wrap_lines(DISCLAIMER, inner_max)
        } else {
            Vec::new()
        };

        let natural = lines
            .iter()
            .chain(disclaimer.iter())
            .map(|line| line.width())
            .chain([
                author_label(message.author()).width(),
                message.timestamp().width(),
            ])
            .max()
            .unwrap_or(0) as u16;
        let inner = natural.clamp(1, inner_max);

        // Separator rule plus the wrapped disclaimer
        let disclaimer_rows = if disclaimer.is_empty() {
            0
        } else {
            disclaimer.len() as u16 + 1
        };

        BubbleLayout {
            width: inner + HORIZONTAL_OVERHEAD,
            height: (lines.len() as u16).max(1) + disclaimer_rows + VERTICAL_OVERHEAD,
            lines,
            disclaimer,
        }
    }

    pub fn calculate_height(message: &Message, disclaimer_threshold: usize, width: u16) -> u16 {
        Self::layout(message, disclaimer_threshold, width).height
    }

    fn styles(&self) -> (ratatui::style::Style, ratatui::style::Style) {
        match (self.message.author(), self.message.is_error()) {
            (Author::User, _) => (self.palette.user_bubble, self.palette.user_border),
            (Author::Assistant, true) => (self.palette.error_bubble, self.palette.error_border),
            (Author::Assistant, false) => {
                (self.palette.assistant_bubble, self.palette.assistant_border)
            }
        }
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Self::layout(self.message, self.disclaimer_threshold, area.width);
        let is_user = self.message.author() == Author::User;

        let x = if is_user {
            area.x + area.width.saturating_sub(layout.width)
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, layout.width.min(area.width), layout.height.min(area.height));

        let (style, border_style) = self.styles();
        let label = Line::from(author_label(self.message.author()));
        let timestamp = Line::styled(self.message.timestamp(), self.palette.muted);
        let (label, timestamp) = if is_user {
            (label.right_aligned(), timestamp.right_aligned())
        } else {
            (label.left_aligned(), timestamp.left_aligned())
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(label)
            .title_style(border_style)
            .title_bottom(timestamp)
            .style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let mut lines: Vec<Line> = layout.lines.into_iter().map(Line::from).collect();
        if !layout.disclaimer.is_empty() {
            lines.push(Line::styled(
                "─".repeat(inner.width as usize),
                self.palette.muted,
            ));
            lines.extend(
                layout
                    .disclaimer
                    .into_iter()
                    .map(|line| Line::styled(line, self.palette.disclaimer)),
            );
        }

        Paragraph::new(lines).style(style).render(inner, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn reply(text: &str) -> Message {
        Message::assistant(2, text.to_string(), "10:05".to_string())
    }

    fn palette() -> Palette {
        Palette::for_theme(Theme::Light)
    }

    fn render_to_text(message: &Message, width: u16, threshold: usize) -> Vec<String> {
        let height = MessageBubble::calculate_height(message, threshold, width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let mut bubble = MessageBubble::new(message, palette(), threshold);
                Component::render(&mut bubble, f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    // ==========================================================================
    // Disclaimer rule
    // ==========================================================================

    #[test]
    fn disclaimer_needs_more_than_threshold_chars() {
        assert!(!shows_disclaimer(&reply(&"a".repeat(100)), 100));
        assert!(shows_disclaimer(&reply(&"a".repeat(101)), 100));
    }

    #[test]
    fn disclaimer_counts_characters_not_bytes() {
        // 60 two-byte characters: 120 bytes but only 60 chars
        assert!(!shows_disclaimer(&reply(&"é".repeat(60)), 100));
    }

    #[test]
    fn disclaimer_never_on_user_or_error_messages() {
        let long = "b".repeat(300);
        let user = Message::user(1, long, "10:00".into());
        let failure = Message::failure(3, "10:01".into());
        assert!(!shows_disclaimer(&user, 100));
        assert!(failure.text().chars().count() > 100);
        assert!(!shows_disclaimer(&failure, 100));
    }

    // ==========================================================================
    // Layout
    // ==========================================================================

    #[test]
    fn short_message_is_one_line_plus_borders() {
        assert_eq!(
            MessageBubble::calculate_height(&reply("Hello"), 100, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn newlines_are_preserved() {
        assert_eq!(
            MessageBubble::calculate_height(&reply("one\ntwo\n\nfour"), 100, 80),
            4 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn disclaimer_adds_rows() {
        let text = "x ".repeat(60);
        let without = MessageBubble::calculate_height(&reply(&text), 1000, 80);
        let with = MessageBubble::calculate_height(&reply(&text), 100, 80);
        assert!(with >= without + 2);
    }

    #[test]
    fn bubble_is_capped_at_three_quarters() {
        let layout = MessageBubble::layout(&reply(&"a".repeat(200)), 1000, 80);
        assert_eq!(layout.width, 60);
    }

    #[test]
    fn degenerate_width_returns_minimum() {
        assert_eq!(MessageBubble::calculate_height(&reply("Hello"), 100, 0), 1);
    }

    // ==========================================================================
    // Rendering
    // ==========================================================================

    #[test]
    fn user_bubble_hugs_right_edge() {
        let msg = Message::user(1, "Hi".into(), "09:15".into());
        let rows = render_to_text(&msg, 60, 100);
        assert!(rows[0].starts_with(' '));
        assert!(rows[0].trim_end().ends_with('╮'));
        assert!(rows[0].contains("You"));
        assert!(rows.last().unwrap().contains("09:15"));
    }

    #[test]
    fn assistant_bubble_hugs_left_edge() {
        let rows = render_to_text(&reply("Rest and fluids."), 60, 100);
        assert!(rows[0].starts_with('╭'));
        assert!(rows[0].contains("Medical Assistant"));
        assert!(rows[1].contains("Rest and fluids."));
    }

    #[test]
    fn long_reply_renders_disclaimer() {
        let text = "Ibuprofen is a nonsteroidal anti-inflammatory drug used for pain, fever and inflammation in adults.";
        let rows = render_to_text(&reply(&format!("{text} More detail.")), 80, 100);
        let joined = rows.join("\n");
        assert!(joined.contains("educational purposes"));
    }
}
