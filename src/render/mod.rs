//! Turning circulars into display-ready card descriptors

pub mod cards;
pub mod date;
pub mod sanitize;

pub use cards::{render, Card, CardAction, CardActions, CardDescriptor, NO_ITEMS_TEXT};
pub use date::format_date;
pub use sanitize::{escape, unescape};
