//! End-to-end load, render and share scenarios over HTTP

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use circulars_cli::app::loader::{LoadController, LoadOutcome, FALLBACK_WARNING};
use circulars_cli::app::presenter::{BannerKind, RecordingPresenter};
use circulars_cli::bulletins::HttpBulletinClient;
use circulars_cli::render::{CardAction, CardDescriptor};
use circulars_cli::share::{
    ClipboardError, ClipboardWriter, ShareCoordinator, ShareOutcome, ShareTemplate, COPIED_TOAST,
};
use circulars_cli::viewer::{MemorySurface, OverlayInput, ViewerOverlay, ViewerState};
use common::spawn_fake_endpoint;

fn loader(base: &str, path: &str) -> LoadController {
    LoadController::new(Arc::new(HttpBulletinClient::new(format!("{}{}", base, path))))
}

#[derive(Default)]
struct CapturingClipboard(Mutex<Vec<String>>);

#[async_trait]
impl ClipboardWriter for CapturingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_load_renders_escaped_cards_in_order() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/ok");
    let mut presenter = RecordingPresenter::default();

    let outcome = loader.load(&mut presenter).await;
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            count: 2,
            used_fallback: false
        }
    );
    assert!(presenter.banners.is_empty());

    let first = presenter.cards[0].as_card().unwrap();
    assert_eq!(first.serial_text, "#12");
    assert_eq!(first.formatted_date, "1 May 2024");
    assert_eq!(first.order_text, "45/A");
    assert_eq!(first.subject, "Exam &lt;Schedule&gt;");
    assert_eq!(presenter.cards[1].as_card().unwrap().serial_text, "#11");
    assert!(presenter.refresh_enabled);
}

#[tokio::test]
async fn test_degraded_load_warns_once() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/degraded");
    let mut presenter = RecordingPresenter::default();

    loader.load(&mut presenter).await;
    assert_eq!(presenter.cards.len(), 1);
    assert_eq!(presenter.banners.len(), 1);
    assert_eq!(presenter.banners[0].kind, BannerKind::Warning);
    assert_eq!(presenter.banners[0].message, FALLBACK_WARNING);
}

#[tokio::test]
async fn test_upstream_failure_shows_error_banner_only() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/down");
    let mut presenter = RecordingPresenter::default();

    let outcome = loader.load(&mut presenter).await;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert!(presenter.cards.is_empty());
    assert_eq!(
        presenter.banner.as_ref().unwrap().message,
        "Failed to load circulars: upstream down"
    );
    assert_eq!(presenter.refresh_label, "Refresh");
}

#[tokio::test]
async fn test_empty_load_shows_sentinel() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/empty");
    let mut presenter = RecordingPresenter::default();

    loader.load(&mut presenter).await;
    assert_eq!(presenter.cards, vec![CardDescriptor::Empty]);
}

#[tokio::test]
async fn test_view_action_opens_decoded_link() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/ok");
    let mut presenter = RecordingPresenter::default();
    loader.load(&mut presenter).await;

    let card = presenter.cards[0].as_card().unwrap();
    let CardAction::View { link, title } = &card.actions.view else {
        panic!("view action expected");
    };

    let mut overlay = ViewerOverlay::new(Box::new(MemorySurface::default()));
    overlay.open(link, Some(title.as_str()));
    assert_eq!(
        overlay.state(),
        &ViewerState::Open {
            url: "https://dte.example/docs/circular 12.pdf".to_string(),
            title: "Circular #12".to_string(),
        }
    );

    assert!(overlay.handle_input(OverlayInput::ClickOutside));
    assert!(!overlay.handle_input(OverlayInput::CancelKey));
    assert_eq!(overlay.surface().source(), None);
}

#[tokio::test]
async fn test_share_action_copies_raw_message() {
    let base = spawn_fake_endpoint().await;
    let mut loader = loader(&base, "/ok");
    let mut presenter = RecordingPresenter::default();
    loader.load(&mut presenter).await;

    let CardAction::Share(bulletin) = presenter.cards[0].as_card().unwrap().actions.share.clone()
    else {
        panic!("share action expected");
    };

    let clipboard = Arc::new(CapturingClipboard::default());
    let sharer = ShareCoordinator::new(ShareTemplate::default()).with_clipboard(clipboard.clone());
    let outcome = sharer.share(&bulletin, &mut presenter).await;

    assert_eq!(outcome, ShareOutcome::Copied);
    assert_eq!(presenter.toasts[0].message, COPIED_TOAST);
    let copied = clipboard.0.lock().unwrap()[0].clone();
    assert!(copied.contains("Exam <Schedule>"));
    assert!(copied.contains("📄 *Order No:* 45/A"));
    assert!(copied.contains("https://dte.example/docs/circular%2012.pdf"));
}
