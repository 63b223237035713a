//! Circulars list
//!
//! Two lines per card. Cards are revealed one by one after a load; the empty
//! sentinel and the loading text replace the list.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::render::sanitize::{strip_control, unescape};
use crate::render::{Card, CardDescriptor, NO_ITEMS_TEXT};
use crate::tui::state::AppState;
use crate::tui::theme::Theme;

/// Card text is stored escaped; the terminal shows the original characters
pub fn display_text(escaped: &str) -> String {
    strip_control(&unescape(escaped))
}

pub struct CardList<'a> {
    state: &'a AppState,
    now: Instant,
}

impl<'a> CardList<'a> {
    pub fn new(state: &'a AppState, now: Instant) -> Self {
        Self { state, now }
    }

    fn card_item(card: &'a Card, theme: &Theme) -> ListItem<'a> {
        let meta = Line::from(vec![
            Span::styled(
                card.serial_text.as_str(),
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  📅 ", Style::default().fg(theme.text_muted)),
            Span::styled(
                strip_control(&card.formatted_date),
                Style::default().fg(theme.text_secondary),
            ),
            Span::styled("  📄 Order: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                display_text(&card.order_text),
                Style::default().fg(theme.text_secondary),
            ),
        ]);
        let subject = Line::from(Span::styled(
            format!("   {}", display_text(&card.subject).replace('\n', " ")),
            Style::default().fg(theme.text_primary),
        ));
        ListItem::new(Text::from(vec![meta, subject, Line::default()]))
    }

    fn render_centered(text: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let y = area.y + area.height / 2;
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(style)
            .render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let theme = &self.state.theme;
        buf.set_style(area, Style::default().bg(theme.bg_main));

        if self.state.loading {
            Self::render_centered(
                self.state.loading_text,
                Style::default().fg(theme.cyan),
                area,
                buf,
            );
            return;
        }

        if matches!(self.state.cards.as_slice(), [CardDescriptor::Empty]) {
            Self::render_centered(
                NO_ITEMS_TEXT,
                Style::default().fg(theme.text_muted),
                area,
                buf,
            );
            return;
        }

        let revealed = self.state.revealed_count(self.now);
        let items: Vec<ListItem> = self
            .state
            .cards
            .iter()
            .take(revealed)
            .filter_map(CardDescriptor::as_card)
            .map(|card| Self::card_item(card, theme))
            .collect();
        if items.is_empty() {
            return;
        }

        let selected = self.state.selected.min(items.len() - 1);
        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.bg_selected))
            .highlight_symbol("▌ ");
        let mut list_state = ListState::default().with_selected(Some(selected));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
