//! Card descriptors for the circulars list
//!
//! A descriptor holds everything a frontend needs to draw one card. Text fields
//! are already escaped and the date is already formatted. User actions carry
//! typed payloads built from the raw bulletin, so no handler ever re-parses or
//! re-escapes display text.

use std::time::Duration;

use serde::Serialize;

use super::date::format_date;
use super::sanitize::escape;
use crate::bulletins::Bulletin;

/// Text shown in place of the list when a load returns no circulars
pub const NO_ITEMS_TEXT: &str = "No circulars found";

/// Delay between successive card reveals
pub const STAGGER_STEP: Duration = Duration::from_millis(100);

/// One entry of the rendered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardDescriptor {
    Card(Card),
    /// The load succeeded but there is nothing to show
    Empty,
}

impl CardDescriptor {
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            CardDescriptor::Card(card) => Some(card),
            CardDescriptor::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// `#<serial>`
    pub serial_text: String,
    pub formatted_date: String,
    /// Escaped order number or `N/A`
    pub order_text: String,
    /// Escaped subject
    pub subject: String,
    /// Document link as received
    pub link: String,
    pub render_index: usize,
    #[serde(skip_serializing)]
    pub actions: CardActions,
}

/// Typed payloads for the user actions a card exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardActions {
    pub view: CardAction,
    pub share: CardAction,
    pub open_external: CardAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Preview the document in the viewer overlay
    View { link: String, title: String },
    /// Share a summary of the raw bulletin
    Share(Bulletin),
    /// Hand the link to the system opener
    OpenExternal(String),
}

impl Card {
    pub fn from_bulletin(bulletin: &Bulletin, render_index: usize) -> Self {
        Self {
            serial_text: format!("#{}", bulletin.serial_number),
            formatted_date: format_date(&bulletin.date),
            order_text: escape(bulletin.order_label()),
            subject: escape(&bulletin.subject),
            link: bulletin.document_link.clone(),
            render_index,
            actions: CardActions {
                view: CardAction::View {
                    link: bulletin.document_link.clone(),
                    title: format!("Circular #{}", bulletin.serial_number),
                },
                share: CardAction::Share(bulletin.clone()),
                open_external: CardAction::OpenExternal(bulletin.document_link.clone()),
            },
        }
    }

    /// Entrance delay for progressive reveal
    pub fn stagger_delay(&self) -> Duration {
        STAGGER_STEP * self.render_index as u32
    }
}

/// Render bulletins into card descriptors, preserving input order
pub fn render(bulletins: &[Bulletin]) -> Vec<CardDescriptor> {
    if bulletins.is_empty() {
        return vec![CardDescriptor::Empty];
    }

    bulletins
        .iter()
        .enumerate()
        .map(|(index, bulletin)| CardDescriptor::Card(Card::from_bulletin(bulletin, index)))
        .collect()
}
