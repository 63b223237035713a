//! Manual copy dialog, the last share tier
//!
//! Shows the full message in a read-only, selectable field with a copy action.
//! Copy feedback is inline: "Copied!" on success, a hint to select the text by
//! hand when no programmatic copy is possible. Feedback resets after a delay.

use std::time::{Duration, Instant};

use super::tiers::ClipboardWriter;

pub const DIALOG_TITLE: &str = "Share Circular";
pub const COPY_LABEL: &str = "Copy Text";
pub const COPIED_LABEL: &str = "Copied!";
pub const MANUAL_COPY_LABEL: &str = "Select the text to copy it manually";

/// How long copy feedback stays before the button label resets
pub const FEEDBACK_RESET: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Copied,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDialog {
    message: String,
    feedback: CopyFeedback,
    feedback_since: Option<Instant>,
}

impl ShareDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            feedback: CopyFeedback::Idle,
            feedback_since: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn feedback(&self) -> CopyFeedback {
        self.feedback
    }

    pub fn copy_label(&self) -> &'static str {
        match self.feedback {
            CopyFeedback::Idle => COPY_LABEL,
            CopyFeedback::Copied => COPIED_LABEL,
            CopyFeedback::Manual => MANUAL_COPY_LABEL,
        }
    }

    /// Copy the message. Never fails silently: the feedback always changes.
    pub async fn copy(&mut self, clipboard: Option<&dyn ClipboardWriter>) -> bool {
        let copied = match clipboard {
            Some(clipboard) => match clipboard.write_text(&self.message).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Share dialog copy failed: {}", e);
                    false
                }
            },
            None => false,
        };

        self.feedback = if copied {
            CopyFeedback::Copied
        } else {
            CopyFeedback::Manual
        };
        self.feedback_since = Some(Instant::now());
        copied
    }

    /// Reset copy feedback once it has been visible long enough
    pub fn tick(&mut self, now: Instant) {
        if let Some(since) = self.feedback_since {
            if now.saturating_duration_since(since) >= FEEDBACK_RESET {
                self.feedback = CopyFeedback::Idle;
                self.feedback_since = None;
            }
        }
    }
}
