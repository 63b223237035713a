//! Terminal UI state
//!
//! `AppState` is the terminal's [`Presenter`]: the pipeline pushes cards,
//! banners, toasts and dialogs into it, and the widgets read them back out.

use std::time::Instant;

use super::theme::Theme;
use crate::app::loader::{LOADING_TEXT, REFRESH_LABEL};
use crate::app::presenter::{Banner, Presenter, Toast};
use crate::render::{Card, CardDescriptor};
use crate::share::ShareDialog;
use crate::theme::control_labels;
use crate::viewer::DocumentInfo;

#[derive(Debug)]
pub struct AppState {
    pub cards: Vec<CardDescriptor>,
    pub selected: usize,
    pub loading: bool,
    pub loading_text: &'static str,
    pub refresh_enabled: bool,
    pub refresh_label: String,
    pub banner: Option<Banner>,
    pub toast: Option<(Toast, Instant)>,
    pub share_dialog: Option<ShareDialog>,
    pub dark: bool,
    pub theme: Theme,
    pub theme_label: String,
    pub theme_accessible_label: String,
    /// Probe result for the document in the viewer
    pub document_info: Option<DocumentInfo>,
    /// When the current cards were shown, for the staggered reveal
    pub cards_shown_at: Option<Instant>,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let (theme_label, theme_accessible_label) = control_labels(false);
        Self {
            cards: Vec::new(),
            selected: 0,
            loading: false,
            loading_text: LOADING_TEXT,
            refresh_enabled: true,
            refresh_label: REFRESH_LABEL.to_string(),
            banner: None,
            toast: None,
            share_dialog: None,
            dark: false,
            theme: Theme::default(),
            theme_label: theme_label.to_string(),
            theme_accessible_label: theme_accessible_label.to_string(),
            document_info: None,
            cards_shown_at: None,
            should_quit: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card under the selection cursor
    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected).and_then(CardDescriptor::as_card)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Number of cards whose entrance delay has passed at `now`
    pub fn revealed_count(&self, now: Instant) -> usize {
        let Some(shown_at) = self.cards_shown_at else {
            return self.cards.len();
        };
        let elapsed = now.saturating_duration_since(shown_at);
        self.cards
            .iter()
            .take_while(|descriptor| match descriptor {
                CardDescriptor::Card(card) => card.stagger_delay() <= elapsed,
                CardDescriptor::Empty => true,
            })
            .count()
    }

    /// Expire timed UI: the toast and the dialog's copy feedback
    pub fn tick(&mut self, now: Instant) {
        if let Some((toast, since)) = &self.toast {
            if now.saturating_duration_since(*since) >= toast.duration {
                self.toast = None;
            }
        }
        if let Some(dialog) = self.share_dialog.as_mut() {
            dialog.tick(now);
        }
    }
}

impl Presenter for AppState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_refresh_control(&mut self, enabled: bool, label: &str) {
        self.refresh_enabled = enabled;
        self.refresh_label = label.to_string();
    }

    fn show_cards(&mut self, cards: &[CardDescriptor]) {
        self.cards = cards.to_vec();
        self.selected = 0;
        self.cards_shown_at = Some(Instant::now());
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
        self.selected = 0;
        self.cards_shown_at = None;
    }

    fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    fn clear_banner(&mut self) {
        self.banner = None;
    }

    fn show_toast(&mut self, toast: Toast) {
        self.toast = Some((toast, Instant::now()));
    }

    fn show_share_dialog(&mut self, dialog: ShareDialog) {
        self.share_dialog = Some(dialog);
    }

    fn apply_theme(&mut self, dark: bool) {
        self.dark = dark;
        self.theme = Theme::for_mode(dark);
    }

    fn set_theme_control(&mut self, label: &str, accessible_label: &str) {
        self.theme_label = label.to_string();
        self.theme_accessible_label = accessible_label.to_string();
    }
}
