//! Share message template
//!
//! The message is plain text for chat apps, so fields go in raw: no markup
//! escaping here, whatever the card renderer did.

use serde::{Deserialize, Serialize};

use crate::bulletins::Bulletin;
use crate::render::format_date;

/// Header and footer lines around the message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareTemplate {
    pub header: String,
    pub footer: String,
}

impl Default for ShareTemplate {
    fn default() -> Self {
        Self {
            header: "DTE Karnataka Circular".to_string(),
            footer: "Shared from DTE Circulars App".to_string(),
        }
    }
}

/// Payload handed to a native share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

pub fn share_title(bulletin: &Bulletin) -> String {
    format!(
        "DTE Circular #{} - {}",
        bulletin.serial_number,
        format_date(&bulletin.date)
    )
}

pub fn build_share_message(bulletin: &Bulletin, template: &ShareTemplate) -> String {
    format!(
        "🔔 *{header}*\n\
         \n\
         📋 *Serial No:* #{serial}\n\
         📅 *Date:* {date}\n\
         📄 *Order No:* {order}\n\
         \n\
         📝 *Subject:*\n\
         {subject}\n\
         \n\
         🔗 *PDF Link:* {link}\n\
         \n\
         ---\n\
         {footer}",
        header = template.header,
        serial = bulletin.serial_number,
        date = format_date(&bulletin.date),
        order = bulletin.order_label(),
        subject = bulletin.subject,
        link = bulletin.document_link,
        footer = template.footer,
    )
}

impl ShareRequest {
    pub fn for_bulletin(bulletin: &Bulletin, template: &ShareTemplate) -> Self {
        Self {
            title: share_title(bulletin),
            text: build_share_message(bulletin, template),
            url: bulletin.document_link.clone(),
        }
    }
}
