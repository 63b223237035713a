//! Widgets for the circulars terminal UI

pub mod banner;
pub mod card_list;
pub mod header;
pub mod modal;
pub mod share_dialog;
pub mod viewer;

pub use banner::{BannerBar, StatusLine};
pub use card_list::CardList;
pub use header::Header;
pub use modal::{centered_rect, Modal};
pub use share_dialog::ShareDialogPanel;
pub use viewer::ViewerPanel;

use unicode_width::UnicodeWidthChar;

/// Cut `text` to at most `width` terminal columns
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
