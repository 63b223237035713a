//! Banner and status strips
//!
//! `BannerBar` shows the list's error or warning banner as a single bordered
//! line. `StatusLine` sits at the bottom and shows the toast when there is one,
//! key hints otherwise.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::truncate_to_width;
use crate::app::presenter::{Banner, BannerKind, Toast};
use crate::render::sanitize::strip_control;
use crate::tui::theme::Theme;

const DOT_SMALL: char = '·';
const DOT_LARGE: char = '●';

pub const KEY_HINTS: &str =
    "r refresh · ↑/↓ select · enter view · s share · o open · d theme · q quit";

pub struct BannerBar<'a> {
    banner: &'a Banner,
    theme: &'a Theme,
}

impl<'a> BannerBar<'a> {
    pub fn new(banner: &'a Banner, theme: &'a Theme) -> Self {
        Self { banner, theme }
    }

    fn style(&self) -> Style {
        let fg = match self.banner.kind {
            BannerKind::Error => self.theme.red,
            BannerKind::Warning => self.theme.yellow,
        };
        Style::default().fg(fg).bg(self.theme.bg_dark)
    }
}

impl Widget for BannerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.style();
        buf.set_style(area, style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let indicator = format!("{} {} ", DOT_LARGE, DOT_SMALL);
        let message = truncate_to_width(
            &strip_control(&self.banner.message).replace('\n', " "),
            inner_width.saturating_sub(indicator.chars().count()),
        );
        let content = format!("│{}{}", indicator, message);
        buf.set_stringn(area.x, area.y, &content, area.width as usize, style);
        buf.set_stringn(area.right() - 1, area.y, "│", 1, style);
    }
}

pub struct StatusLine<'a> {
    toast: Option<&'a Toast>,
    theme: &'a Theme,
    hints: &'a str,
}

impl<'a> StatusLine<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            toast: None,
            theme,
            hints: KEY_HINTS,
        }
    }

    pub fn toast(mut self, toast: Option<&'a Toast>) -> Self {
        self.toast = toast;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (text, style) = match self.toast {
            Some(toast) => (
                format!("✔ {}", strip_control(&toast.message).replace('\n', " ")),
                Style::default().fg(self.theme.green).bg(self.theme.bg_dark),
            ),
            None => (
                self.hints.to_string(),
                Style::default()
                    .fg(self.theme.text_muted)
                    .bg(self.theme.bg_dark),
            ),
        };
        buf.set_style(area, style);

        // Centered, like the flash bar's idle message
        let text = truncate_to_width(&text, area.width as usize);
        let text_width = unicode_width::UnicodeWidthStr::width(text.as_str()) as u16;
        let x = area.left() + area.width.saturating_sub(text_width) / 2;
        buf.set_stringn(x, area.top(), &text, area.width as usize, style);
    }
}
