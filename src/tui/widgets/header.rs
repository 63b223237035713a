//! Header Widget
//!
//! App title on the left, refresh and theme controls on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::state::AppState;

pub const APP_TITLE: &str = "DTE Circulars";

pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let theme = &self.state.theme;
        let base = Style::default().bg(theme.bg_dark);
        buf.set_style(area, base);

        let title = Line::from(vec![
            Span::styled("📄 ", Style::default().fg(theme.cyan)),
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(title).style(base).render(area, buf);

        let refresh_style = if self.state.refresh_enabled {
            Style::default().fg(theme.blue)
        } else {
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::DIM)
        };
        let controls = Line::from(vec![
            Span::styled("[r] ", Style::default().fg(theme.text_muted)),
            Span::styled(self.state.refresh_label.as_str(), refresh_style),
            Span::raw("  "),
            Span::styled("[d] ", Style::default().fg(theme.text_muted)),
            Span::styled(
                self.state.theme_label.as_str(),
                Style::default().fg(theme.purple),
            ),
            Span::raw(" "),
        ]);
        Paragraph::new(controls)
            .alignment(Alignment::Right)
            .style(base)
            .render(area, buf);
    }
}
