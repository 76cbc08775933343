//! Colour palettes for the light and dark themes.
//!
//! Every component takes a `Palette` prop instead of reading the theme flag
//! itself, so a toggle re-colours the whole tree on the next frame.

use ratatui::style::{Color, Modifier, Style};

use crate::core::state::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Screen background and default text.
    pub base: Style,
    pub header: Style,
    pub header_accent: Style,
    pub online: Style,
    pub user_bubble: Style,
    pub user_border: Style,
    pub assistant_bubble: Style,
    pub assistant_border: Style,
    pub error_bubble: Style,
    pub error_border: Style,
    /// Labels, timestamps, hints.
    pub muted: Style,
    pub disclaimer: Style,
    pub warning_box: Style,
    pub accent: Style,
    pub input_text: Style,
    pub input_border: Style,
    pub input_disabled: Style,
}

// Tailwind-ish tones
const GRAY_50: Color = Color::Rgb(249, 250, 251);
const GRAY_100: Color = Color::Rgb(243, 244, 246);
const GRAY_200: Color = Color::Rgb(229, 231, 235);
const GRAY_400: Color = Color::Rgb(156, 163, 175);
const GRAY_500: Color = Color::Rgb(107, 114, 128);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_800: Color = Color::Rgb(31, 41, 55);
const GRAY_900: Color = Color::Rgb(17, 24, 39);
const INDIGO_400: Color = Color::Rgb(129, 140, 248);
const INDIGO_600: Color = Color::Rgb(79, 70, 229);
const BLUE_500: Color = Color::Rgb(59, 130, 246);
const GREEN_400: Color = Color::Rgb(74, 222, 128);
const RED_200: Color = Color::Rgb(254, 202, 202);
const RED_700: Color = Color::Rgb(185, 28, 28);
const RED_800: Color = Color::Rgb(153, 27, 27);
const YELLOW_200: Color = Color::Rgb(254, 240, 138);
const YELLOW_800: Color = Color::Rgb(133, 77, 14);

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            base: Style::default().fg(GRAY_800).bg(GRAY_50),
            header: Style::default()
                .fg(Color::White)
                .bg(INDIGO_600)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(GRAY_100).bg(INDIGO_600),
            online: Style::default().fg(GREEN_400).bg(INDIGO_600),
            user_bubble: Style::default().fg(Color::White).bg(BLUE_500),
            user_border: Style::default().fg(INDIGO_600),
            assistant_bubble: Style::default().fg(GRAY_800).bg(Color::White),
            assistant_border: Style::default().fg(GRAY_200),
            error_bubble: Style::default().fg(RED_800).bg(Color::Rgb(254, 242, 242)),
            error_border: Style::default().fg(RED_200),
            muted: Style::default().fg(GRAY_500),
            disclaimer: Style::default().fg(GRAY_500).add_modifier(Modifier::ITALIC),
            warning_box: Style::default().fg(YELLOW_800),
            accent: Style::default().fg(INDIGO_600).add_modifier(Modifier::BOLD),
            input_text: Style::default().fg(GRAY_800),
            input_border: Style::default().fg(GRAY_200),
            input_disabled: Style::default().fg(GRAY_400).add_modifier(Modifier::DIM),
        }
    }

    fn dark() -> Self {
        Self {
            base: Style::default().fg(GRAY_100).bg(GRAY_900),
            header: Style::default()
                .fg(Color::White)
                .bg(GRAY_800)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(GRAY_400).bg(GRAY_800),
            online: Style::default().fg(GREEN_400).bg(GRAY_800),
            user_bubble: Style::default().fg(Color::White).bg(INDIGO_600),
            user_border: Style::default().fg(INDIGO_400),
            assistant_bubble: Style::default().fg(GRAY_100).bg(GRAY_700),
            assistant_border: Style::default().fg(GRAY_600),
            error_bubble: Style::default().fg(RED_200).bg(Color::Rgb(69, 10, 10)),
            error_border: Style::default().fg(RED_700),
            muted: Style::default().fg(GRAY_400),
            disclaimer: Style::default().fg(GRAY_400).add_modifier(Modifier::ITALIC),
            warning_box: Style::default().fg(YELLOW_200),
            accent: Style::default().fg(INDIGO_400).add_modifier(Modifier::BOLD),
            input_text: Style::default().fg(GRAY_100),
            input_border: Style::default().fg(GRAY_600),
            input_disabled: Style::default().fg(GRAY_500).add_modifier(Modifier::DIM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Light), Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn error_bubble_is_reddish_in_both_themes() {
        for theme in [Theme::Light, Theme::Dark] {
            let palette = Palette::for_theme(theme);
            assert!(matches!(palette.error_bubble.fg, Some(Color::Rgb(r, g, _)) if r > g));
        }
    }
}
