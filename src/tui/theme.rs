//! Color palettes for the terminal frontend
//!
//! Two palettes only, chosen by the dark mode preference: Catppuccin Mocha for
//! dark and Catppuccin Latte for light.

use ratatui::style::Color;

/// Theme colors for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Background colors
    pub bg_main: Color,
    pub bg_dark: Color,
    pub bg_selected: Color,

    // Border colors
    pub border: Color,
    pub border_focused: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub cyan: Color,
    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub purple: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Catppuccin Mocha
    pub fn dark() -> Self {
        Self {
            bg_main: Color::Rgb(30, 30, 46),
            bg_dark: Color::Rgb(24, 24, 37),
            bg_selected: Color::Rgb(49, 50, 68),

            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(137, 180, 250),

            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            text_muted: Color::Rgb(108, 112, 134),

            cyan: Color::Rgb(148, 226, 213),
            blue: Color::Rgb(137, 180, 250),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            red: Color::Rgb(243, 139, 168),
            purple: Color::Rgb(203, 166, 247),
        }
    }

    /// Catppuccin Latte
    pub fn light() -> Self {
        Self {
            bg_main: Color::Rgb(239, 241, 245),
            bg_dark: Color::Rgb(230, 233, 239),
            bg_selected: Color::Rgb(204, 208, 218),

            border: Color::Rgb(188, 192, 204),
            border_focused: Color::Rgb(30, 102, 245),

            text_primary: Color::Rgb(76, 79, 105),
            text_secondary: Color::Rgb(92, 95, 119),
            text_muted: Color::Rgb(140, 143, 161),

            cyan: Color::Rgb(23, 146, 153),
            blue: Color::Rgb(30, 102, 245),
            green: Color::Rgb(64, 160, 43),
            yellow: Color::Rgb(223, 142, 29),
            red: Color::Rgb(210, 15, 57),
            purple: Color::Rgb(136, 57, 239),
        }
    }
}
