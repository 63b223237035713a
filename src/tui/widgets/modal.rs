//! Modal Widget
//!
//! Base bordered panel drawn centered over the list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::tui::theme::Theme;

/// Area of `width_percent` x `height_percent` centered in `area`
pub fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let popup_width = percent_of(area.width, width_percent);
    let popup_height = percent_of(area.height, height_percent);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}

fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

/// A modal dialog that renders centered on screen
pub struct Modal<'a> {
    title: &'a str,
    content: Vec<Line<'a>>,
    footer: Option<Line<'a>>,
    theme: &'a Theme,
    width_percent: u16,
    height_percent: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            content: Vec::new(),
            footer: None,
            theme,
            width_percent: 60,
            height_percent: 60,
        }
    }

    pub fn content(mut self, content: Vec<Line<'a>>) -> Self {
        self.content = content;
        self
    }

    /// Hint line pinned to the bottom border
    pub fn footer(mut self, footer: Line<'a>) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn width(mut self, percent: u16) -> Self {
        self.width_percent = percent;
        self
    }

    pub fn height(mut self, percent: u16) -> Self {
        self.height_percent = percent;
        self
    }

    /// Where the modal lands inside `area`
    pub fn area(&self, area: Rect) -> Rect {
        centered_rect(area, self.width_percent, self.height_percent)
    }
}

impl Widget for Modal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = self.area(area);

        // Clear the area behind the modal
        Clear.render(modal_area, buf);

        let mut block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.bg_dark));
        if let Some(footer) = self.footer {
            block = block.title_bottom(footer);
        }

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        Paragraph::new(self.content)
            .style(Style::default().fg(self.theme.text_primary))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
