//! Presentation side effects
//!
//! Core components never draw anything themselves. They describe what the
//! user should see through this trait, and each frontend decides how.

use std::time::Duration;

use crate::render::CardDescriptor;
use crate::share::ShareDialog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    /// Distinctly styled, non-blocking notice (e.g. sample data in use)
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }
}

/// Transient confirmation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Sink for everything the pipeline wants shown
pub trait Presenter {
    /// Loading indicator for the list area
    fn set_loading(&mut self, loading: bool);

    /// State and label of the refresh control
    fn set_refresh_control(&mut self, enabled: bool, label: &str);

    fn show_cards(&mut self, cards: &[CardDescriptor]);

    fn clear_cards(&mut self);

    fn show_banner(&mut self, banner: Banner);

    fn clear_banner(&mut self);

    fn show_toast(&mut self, toast: Toast);

    fn show_share_dialog(&mut self, dialog: ShareDialog);

    fn apply_theme(&mut self, dark: bool);

    /// Label and accessibility text of the theme toggle
    fn set_theme_control(&mut self, label: &str, accessible_label: &str);
}

/// Presenter that records every call, for tests and headless use
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub loading: bool,
    pub loading_history: Vec<bool>,
    pub refresh_enabled: bool,
    pub refresh_label: String,
    pub refresh_history: Vec<(bool, String)>,
    pub cards: Vec<CardDescriptor>,
    /// Banner currently visible
    pub banner: Option<Banner>,
    /// Every banner ever shown
    pub banners: Vec<Banner>,
    pub toasts: Vec<Toast>,
    pub dialogs: Vec<ShareDialog>,
    pub dark: Option<bool>,
    pub theme_label: String,
    pub theme_accessible_label: String,
}

impl Presenter for RecordingPresenter {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_history.push(loading);
    }

    fn set_refresh_control(&mut self, enabled: bool, label: &str) {
        self.refresh_enabled = enabled;
        self.refresh_label = label.to_string();
        self.refresh_history.push((enabled, label.to_string()));
    }

    fn show_cards(&mut self, cards: &[CardDescriptor]) {
        self.cards = cards.to_vec();
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner.clone());
        self.banners.push(banner);
    }

    fn clear_banner(&mut self) {
        self.banner = None;
    }

    fn show_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    fn show_share_dialog(&mut self, dialog: ShareDialog) {
        self.dialogs.push(dialog);
    }

    fn apply_theme(&mut self, dark: bool) {
        self.dark = Some(dark);
    }

    fn set_theme_control(&mut self, label: &str, accessible_label: &str) {
        self.theme_label = label.to_string();
        self.theme_accessible_label = accessible_label.to_string();
    }
}
