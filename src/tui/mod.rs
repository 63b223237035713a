//! Terminal frontend
//!
//! A full-screen list of circulars with a document overlay and the share
//! dialog, drawn with ratatui on crossterm.

pub mod app;
pub mod events;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use state::AppState;
pub use theme::Theme;

use std::io::{self, Stdout};
use std::panic;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::loader::LoadController;
use crate::bulletins::HttpBulletinClient;
use crate::config::Config;
use crate::share::ShareCoordinator;
use crate::theme::{FilePreferenceStore, ThemePreference};
use crate::viewer::{MemorySurface, ProbeSurface, ViewerOverlay, ViewingSurface};

/// Build the application from `config` and run it on the real terminal
pub async fn run(config: &Config, data_dir: &Path) -> anyhow::Result<()> {
    let client =
        HttpBulletinClient::from_config(&config.http).context("Failed to build HTTP client")?;
    let loader = LoadController::new(Arc::new(client));

    let (probe_tx, probe_rx) = mpsc::unbounded_channel();
    let surface: Box<dyn ViewingSurface> = if config.viewer.probe {
        Box::new(ProbeSurface::new(reqwest::Client::new(), probe_tx))
    } else {
        Box::new(MemorySurface::default())
    };

    let sharer = ShareCoordinator::from_config(&config.share)
        .with_toast_duration(config.ui.toast_duration());
    let theme = ThemePreference::new(Box::new(FilePreferenceStore::in_dir(data_dir)));

    install_panic_hook();
    let terminal = setup_terminal()?;
    let mut app = App::new(terminal, loader, ViewerOverlay::new(surface), sharer, theme)
        .with_probe_events(probe_rx)
        .with_opener(config.viewer.opener.clone())
        .with_tick_rate(config.ui.tick_rate());

    let result = app.run().await;
    restore_terminal(app.terminal_mut())?;
    result
}

/// Install a panic hook that restores the terminal before panicking
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
