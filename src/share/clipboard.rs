//! System clipboard writer
//!
//! Tries the native clipboard (arboard) first. Without a display server, e.g.
//! over SSH, it can fall back to OSC 52, which asks the local terminal to set
//! the clipboard. OSC 52 cannot confirm delivery, so it is only used when
//! stdout is a terminal that looks capable. Anywhere else the clipboard is
//! reported unavailable and the share chain moves on.

use std::io::{self, IsTerminal, Write};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::tiers::{ClipboardError, ClipboardWriter};

pub struct SystemClipboard {
    osc52: bool,
}

impl SystemClipboard {
    pub fn new(osc52: bool) -> Self {
        Self { osc52 }
    }
}

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let owned = text.to_string();
        let native = tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(|e| {
                tracing::debug!("Native clipboard unavailable: {}", e);
                ClipboardError::Unavailable
            })?;
            clipboard
                .set_text(owned)
                .map_err(|e| ClipboardError::Backend(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Backend(e.to_string()))?;

        match native {
            Ok(()) => Ok(()),
            Err(e) if self.osc52 && osc52_likely_supported(io::stdout().is_terminal()) => {
                tracing::debug!("Native clipboard failed ({}), using OSC 52", e);
                write_osc52(text).map_err(|e| ClipboardError::Backend(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

/// OSC 52 escape sequence that sets the clipboard to `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

fn write_osc52(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(osc52_sequence(text).as_bytes())?;
    stdout.flush()
}

/// Heuristic based on TERM / TERM_PROGRAM; never true when stdout is redirected
pub fn osc52_likely_supported(stdout_is_terminal: bool) -> bool {
    if !stdout_is_terminal {
        return false;
    }
    let term = std::env::var("TERM").unwrap_or_default();
    let program = std::env::var("TERM_PROGRAM").unwrap_or_default();
    term_supports_osc52(&term, &program)
}

fn term_supports_osc52(term: &str, term_program: &str) -> bool {
    const TERMS: [&str; 8] = [
        "xterm", "screen", "tmux", "alacritty", "kitty", "wezterm", "foot", "contour",
    ];
    const PROGRAMS: [&str; 4] = ["iterm", "wezterm", "vscode", "tmux"];

    let term = term.to_lowercase();
    let program = term_program.to_lowercase();
    TERMS.iter().any(|t| term.contains(t)) || PROGRAMS.iter().any(|p| program.contains(p))
}
