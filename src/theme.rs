//! Immutable style values, built once at startup and handed to components

use ratatui::style::{Color, Modifier, Style};

/// Colors and text styles used by every layout
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub muted: Style,
    pub text: Style,
    pub input: Style,
    pub highlight: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let gray = Color::Rgb(0x80, 0x80, 0x80);
        let white = Color::Rgb(0xff, 0xff, 0xff);
        Self {
            border: Style::default().fg(gray),
            muted: Style::default().fg(gray),
            text: Style::default().fg(white),
            input: Style::default().fg(white).add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(white)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            error: Style::default().fg(Color::Rgb(0xff, 0x00, 0x00)),
        }
    }
}

impl Theme {
    /// No colors, for terminals that do not render them well
    pub fn plain() -> Self {
        Self {
            border: Style::default(),
            muted: Style::default(),
            text: Style::default(),
            input: Style::default().add_modifier(Modifier::BOLD),
            highlight: Style::default().add_modifier(Modifier::UNDERLINED),
            error: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}
