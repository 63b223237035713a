//! Non-interactive CLI commands
//!
//! Each command drives the same pipeline as the terminal UI through
//! [`ConsolePresenter`], which prints instead of drawing.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::app::loader::{LoadController, LoadOutcome};
use crate::app::presenter::{Banner, BannerKind, Presenter, Toast};
use crate::bulletins::HttpBulletinClient;
use crate::config::Config;
use crate::render::sanitize::{strip_control, unescape};
use crate::render::{CardDescriptor, NO_ITEMS_TEXT};
use crate::share::{ShareCoordinator, ShareDialog, ShareOutcome};
use crate::theme::{FilePreferenceStore, ThemePreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFormat {
    Text,
    Json,
    /// Cards are not printed at all
    Hidden,
}

/// Presenter that writes cards to `out` and notices to `err`
pub struct ConsolePresenter<O: Write, E: Write> {
    out: O,
    err: E,
    format: CardFormat,
    dark: Option<bool>,
    theme_label: Option<String>,
}

impl ConsolePresenter<io::Stdout, io::Stderr> {
    pub fn stdio(format: CardFormat) -> Self {
        Self::new(io::stdout(), io::stderr(), format)
    }
}

impl<O: Write, E: Write> ConsolePresenter<O, E> {
    pub fn new(out: O, err: E, format: CardFormat) -> Self {
        Self {
            out,
            err,
            format,
            dark: None,
            theme_label: None,
        }
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_text_cards(&mut self, cards: &[CardDescriptor]) -> io::Result<()> {
        for descriptor in cards {
            match descriptor {
                CardDescriptor::Empty => writeln!(self.out, "{}", NO_ITEMS_TEXT.dimmed())?,
                CardDescriptor::Card(card) => {
                    writeln!(
                        self.out,
                        "{}  📅 {}  📄 Order: {}",
                        card.serial_text.bold().blue(),
                        strip_control(&card.formatted_date),
                        terminal_text(&card.order_text)
                    )?;
                    writeln!(self.out, "   {}", terminal_text(&card.subject))?;
                    writeln!(self.out, "   {}", strip_control(&card.link).dimmed())?;
                    writeln!(self.out)?;
                }
            }
        }
        Ok(())
    }

    fn write_cards(&mut self, cards: &[CardDescriptor]) -> io::Result<()> {
        match self.format {
            CardFormat::Hidden => Ok(()),
            CardFormat::Text => self.write_text_cards(cards),
            CardFormat::Json => {
                let json = serde_json::to_string_pretty(cards).map_err(io::Error::other)?;
                writeln!(self.out, "{}", json)
            }
        }
    }
}

fn terminal_text(escaped: &str) -> String {
    strip_control(&unescape(escaped))
}

impl<O: Write, E: Write> Presenter for ConsolePresenter<O, E> {
    fn set_loading(&mut self, loading: bool) {
        tracing::debug!(loading, "Loading state changed");
    }

    fn set_refresh_control(&mut self, _enabled: bool, _label: &str) {}

    fn show_cards(&mut self, cards: &[CardDescriptor]) {
        if let Err(e) = self.write_cards(cards) {
            tracing::warn!("Failed to write cards: {}", e);
        }
    }

    fn clear_cards(&mut self) {}

    fn show_banner(&mut self, banner: Banner) {
        let message = strip_control(&banner.message);
        let line = match banner.kind {
            BannerKind::Error => message.red().bold(),
            BannerKind::Warning => message.yellow(),
        };
        let _ = writeln!(self.err, "{}", line);
    }

    fn clear_banner(&mut self) {}

    fn show_toast(&mut self, toast: Toast) {
        let _ = writeln!(
            self.err,
            "{}",
            format!("✓ {}", strip_control(&toast.message)).green()
        );
    }

    fn show_share_dialog(&mut self, dialog: ShareDialog) {
        // Without a dialog to select from, the message itself is the output
        let _ = writeln!(self.out, "{}", strip_control(dialog.message()));
    }

    fn apply_theme(&mut self, dark: bool) {
        self.dark = Some(dark);
    }

    fn set_theme_control(&mut self, label: &str, _accessible_label: &str) {
        self.theme_label = Some(label.to_string());
    }
}

fn loader_for(config: &Config) -> Result<LoadController> {
    let client =
        HttpBulletinClient::from_config(&config.http).context("Failed to build HTTP client")?;
    Ok(LoadController::new(Arc::new(client)))
}

/// Fetch and print the circulars
pub async fn list(config: &Config, json: bool) -> Result<ExitCode> {
    let format = if json { CardFormat::Json } else { CardFormat::Text };
    let mut loader = loader_for(config)?;
    let mut presenter = ConsolePresenter::stdio(format);
    Ok(list_with(&mut loader, &mut presenter).await)
}

pub async fn list_with(loader: &mut LoadController, presenter: &mut dyn Presenter) -> ExitCode {
    match loader.load(presenter).await {
        LoadOutcome::Loaded { .. } | LoadOutcome::Skipped => ExitCode::SUCCESS,
        LoadOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

/// Fetch the list and share circular `serial`
pub async fn share(config: &Config, serial: u32) -> Result<ExitCode> {
    let mut loader = loader_for(config)?;
    let sharer = ShareCoordinator::from_config(&config.share);
    let mut presenter = ConsolePresenter::stdio(CardFormat::Hidden);
    Ok(share_with(&mut loader, &sharer, serial, &mut presenter).await)
}

pub async fn share_with(
    loader: &mut LoadController,
    sharer: &ShareCoordinator,
    serial: u32,
    presenter: &mut dyn Presenter,
) -> ExitCode {
    if let LoadOutcome::Failed(_) = loader.load(presenter).await {
        return ExitCode::FAILURE;
    }
    let Some(bulletin) = loader.find(serial).cloned() else {
        presenter.show_banner(Banner::error(format!("Circular #{} not found", serial)));
        return ExitCode::FAILURE;
    };

    match sharer.share(&bulletin, presenter).await {
        ShareOutcome::Shared => tracing::info!(serial, "Shared through the native share command"),
        ShareOutcome::Copied | ShareOutcome::DialogShown => {}
    }
    ExitCode::SUCCESS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
}

/// Print or flip the stored dark mode preference
pub fn theme(data_dir: &Path, action: ThemeAction) -> Result<ExitCode> {
    let mut preference = ThemePreference::new(Box::new(FilePreferenceStore::in_dir(data_dir)));
    let mut presenter = ConsolePresenter::stdio(CardFormat::Hidden);
    let dark = match action {
        ThemeAction::Show => preference.init(&mut presenter),
        ThemeAction::Toggle => {
            preference.init(&mut presenter);
            preference.toggle(&mut presenter)
        }
    };

    let mode = if dark { "dark" } else { "light" };
    println!(
        "{} {}  ({})",
        "Theme:".bold(),
        mode,
        presenter.theme_label.as_deref().unwrap_or_default()
    );
    Ok(ExitCode::SUCCESS)
}
