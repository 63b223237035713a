//! Share coordinator
//!
//! Sharing walks an ordered chain of capabilities, one attempt at a time:
//!
//! 1. native share target, if one is configured
//! 2. system clipboard, confirmed with a toast
//! 3. a manual copy dialog, which is always available
//!
//! A tier that is missing, cancelled or failing hands over to the next one
//! without surfacing an error. Only reaching the dialog is visible, and the
//! dialog itself cannot fail.

pub mod clipboard;
pub mod dialog;
pub mod message;
pub mod native;
pub mod tiers;

use std::sync::Arc;
use std::time::Duration;

pub use clipboard::SystemClipboard;
pub use dialog::{CopyFeedback, ShareDialog};
pub use message::{build_share_message, share_title, ShareRequest, ShareTemplate};
pub use native::CommandShare;
pub use tiers::{ClipboardError, ClipboardWriter, NativeShare, ShareError, TierOutcome};

use crate::app::presenter::{Presenter, Toast};
use crate::bulletins::Bulletin;
use crate::config::ShareConfig;

pub const COPIED_TOAST: &str = "Message copied to clipboard! You can now paste it anywhere.";

/// Tiers attempted before falling back to the dialog, in order
const TIERS: [ShareTier; 2] = [ShareTier::Native, ShareTier::Clipboard];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTier {
    Native,
    Clipboard,
}

/// How a share request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    DialogShown,
}

pub struct ShareCoordinator {
    native: Option<Arc<dyn NativeShare>>,
    clipboard: Option<Arc<dyn ClipboardWriter>>,
    template: ShareTemplate,
    toast_duration: Duration,
}

impl ShareCoordinator {
    /// Coordinator with no capabilities; every share ends in the dialog
    pub fn new(template: ShareTemplate) -> Self {
        Self {
            native: None,
            clipboard: None,
            template,
            toast_duration: Toast::DEFAULT_DURATION,
        }
    }

    /// Coordinator wired to the system clipboard and the configured share command
    pub fn from_config(config: &ShareConfig) -> Self {
        let mut coordinator = Self::new(config.template())
            .with_clipboard(Arc::new(SystemClipboard::new(config.osc52)));
        if let Some(command) = config
            .command
            .as_deref()
            .and_then(CommandShare::from_command_line)
        {
            tracing::debug!(program = command.program(), "Native share command configured");
            coordinator = coordinator.with_native(Arc::new(command));
        }
        coordinator
    }

    pub fn with_native(mut self, native: Arc<dyn NativeShare>) -> Self {
        self.native = Some(native);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    /// Clipboard used by the tier-2 attempt and the dialog's copy action
    pub fn clipboard(&self) -> Option<&dyn ClipboardWriter> {
        self.clipboard.as_deref()
    }

    pub fn template(&self) -> &ShareTemplate {
        &self.template
    }

    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Share `bulletin`, trying each tier until one delivers
    pub async fn share(&self, bulletin: &Bulletin, presenter: &mut dyn Presenter) -> ShareOutcome {
        let request = ShareRequest::for_bulletin(bulletin, &self.template);

        for tier in TIERS {
            let outcome = self.attempt(tier, &request).await;
            match (tier, &outcome) {
                (ShareTier::Native, TierOutcome::Delivered) => {
                    tracing::info!(serial = bulletin.serial_number, "Circular shared successfully");
                    return ShareOutcome::Shared;
                }
                (ShareTier::Clipboard, TierOutcome::Delivered) => {
                    tracing::info!(serial = bulletin.serial_number, "Share message copied to clipboard");
                    presenter.show_toast(Toast::new(COPIED_TOAST).duration(self.toast_duration));
                    return ShareOutcome::Copied;
                }
                (_, TierOutcome::Unsupported) => {
                    tracing::debug!(?tier, "Share tier unsupported, falling through");
                }
                (_, TierOutcome::Cancelled) => {
                    tracing::debug!(?tier, "Share tier cancelled, falling through");
                }
                (_, TierOutcome::Failed(reason)) => {
                    tracing::warn!(?tier, "Share tier failed, falling through: {}", reason);
                }
            }
        }

        tracing::debug!(serial = bulletin.serial_number, "Showing manual share dialog");
        presenter.show_share_dialog(ShareDialog::new(request.text));
        ShareOutcome::DialogShown
    }

    async fn attempt(&self, tier: ShareTier, request: &ShareRequest) -> TierOutcome {
        match tier {
            ShareTier::Native => match &self.native {
                Some(native) => native.share(request).await.into(),
                None => TierOutcome::Unsupported,
            },
            ShareTier::Clipboard => match &self.clipboard {
                Some(clipboard) => clipboard.write_text(&request.text).await.into(),
                None => TierOutcome::Unsupported,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presenter::RecordingPresenter;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Calls(Mutex<Vec<&'static str>>);

    impl Calls {
        fn push(&self, call: &'static str) {
            self.0.lock().unwrap().push(call);
        }

        fn get(&self) -> Vec<&'static str> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeNative {
        result: Result<(), ShareError>,
        calls: Arc<Calls>,
        seen: Mutex<Option<ShareRequest>>,
    }

    #[async_trait]
    impl NativeShare for FakeNative {
        async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
            self.calls.push("native");
            *self.seen.lock().unwrap() = Some(request.clone());
            self.result.clone()
        }
    }

    struct FakeClipboard {
        result: Result<(), ClipboardError>,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl ClipboardWriter for FakeClipboard {
        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            self.calls.push("clipboard");
            self.result.clone()
        }
    }

    fn bulletin() -> Bulletin {
        Bulletin {
            serial_number: 12,
            date: "2024-05-01".to_string(),
            order_number: None,
            subject: "Exam <Schedule>".to_string(),
            document_link: "https://x/doc.pdf".to_string(),
        }
    }

    fn coordinator(
        native: Option<Result<(), ShareError>>,
        clipboard: Option<Result<(), ClipboardError>>,
        calls: &Arc<Calls>,
    ) -> ShareCoordinator {
        let mut coordinator = ShareCoordinator::new(ShareTemplate::default());
        if let Some(result) = native {
            coordinator = coordinator.with_native(Arc::new(FakeNative {
                result,
                calls: calls.clone(),
                seen: Mutex::new(None),
            }));
        }
        if let Some(result) = clipboard {
            coordinator = coordinator.with_clipboard(Arc::new(FakeClipboard {
                result,
                calls: calls.clone(),
            }));
        }
        coordinator
    }

    #[tokio::test]
    async fn test_native_success_ends_chain() {
        let calls = Arc::new(Calls::default());
        let sharer = coordinator(Some(Ok(())), Some(Ok(())), &calls);
        let mut presenter = RecordingPresenter::default();

        let outcome = sharer.share(&bulletin(), &mut presenter).await;
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(calls.get(), vec!["native"]);
        assert!(presenter.toasts.is_empty());
        assert!(presenter.dialogs.is_empty());
    }

    #[tokio::test]
    async fn test_native_request_payload() {
        let calls = Arc::new(Calls::default());
        let native = Arc::new(FakeNative {
            result: Ok(()),
            calls: calls.clone(),
            seen: Mutex::new(None),
        });
        let sharer = ShareCoordinator::new(ShareTemplate::default()).with_native(native.clone());
        let mut presenter = RecordingPresenter::default();
        sharer.share(&bulletin(), &mut presenter).await;

        let seen = native.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.title, "DTE Circular #12 - 1 May 2024");
        assert_eq!(seen.url, "https://x/doc.pdf");
        assert!(seen.text.contains("Exam <Schedule>"));
    }

    #[tokio::test]
    async fn test_cancel_falls_through_to_clipboard_without_banner() {
        let calls = Arc::new(Calls::default());
        let sharer = coordinator(Some(Err(ShareError::Cancelled)), Some(Ok(())), &calls);
        let mut presenter = RecordingPresenter::default();

        let outcome = sharer.share(&bulletin(), &mut presenter).await;
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(calls.get(), vec!["native", "clipboard"]);
        assert_eq!(presenter.toasts.len(), 1);
        assert_eq!(presenter.toasts[0].message, COPIED_TOAST);
        assert!(presenter.banners.is_empty());
    }

    #[tokio::test]
    async fn test_clipboard_failure_shows_dialog() {
        let calls = Arc::new(Calls::default());
        let sharer = coordinator(
            Some(Err(ShareError::Failed("boom".to_string()))),
            Some(Err(ClipboardError::Backend("denied".to_string()))),
            &calls,
        );
        let mut presenter = RecordingPresenter::default();

        let outcome = sharer.share(&bulletin(), &mut presenter).await;
        assert_eq!(outcome, ShareOutcome::DialogShown);
        assert_eq!(calls.get(), vec!["native", "clipboard"]);
        assert_eq!(presenter.dialogs.len(), 1);
        assert!(presenter.toasts.is_empty());
        assert!(presenter.banners.is_empty());
    }

    #[tokio::test]
    async fn test_no_capabilities_shows_exact_message() {
        let calls = Arc::new(Calls::default());
        let sharer = coordinator(None, None, &calls);
        let mut presenter = RecordingPresenter::default();

        let outcome = sharer.share(&bulletin(), &mut presenter).await;
        assert_eq!(outcome, ShareOutcome::DialogShown);
        assert!(calls.get().is_empty());
        assert_eq!(
            presenter.dialogs[0].message(),
            build_share_message(&bulletin(), &ShareTemplate::default())
        );
        let message = presenter.dialogs[0].message();
        assert!(message.contains("#12"));
        assert!(message.contains("1 May 2024"));
        assert!(message.contains("N/A"));
        assert!(message.contains("Exam <Schedule>"));
        assert!(message.contains("https://x/doc.pdf"));
    }

    #[test]
    fn test_from_config_wires_native_only_when_configured() {
        let config = ShareConfig::default();
        let sharer = ShareCoordinator::from_config(&config);
        assert!(!sharer.has_native());
        assert!(sharer.clipboard().is_some());

        let config = ShareConfig {
            command: Some("termux-share -a send".to_string()),
            footer: "Sent from my terminal".to_string(),
            ..Default::default()
        };
        let sharer = ShareCoordinator::from_config(&config);
        assert!(sharer.has_native());
        assert_eq!(sharer.template().footer, "Sent from my terminal");
    }

    #[tokio::test]
    async fn test_unsupported_native_goes_straight_to_clipboard() {
        let calls = Arc::new(Calls::default());
        let sharer = coordinator(Some(Err(ShareError::Unsupported)), Some(Ok(())), &calls);
        let mut presenter = RecordingPresenter::default();
        assert_eq!(
            sharer.share(&bulletin(), &mut presenter).await,
            ShareOutcome::Copied
        );
    }
}
