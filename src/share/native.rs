//! Native share through an external command
//!
//! The terminal has no share sheet, so "native share" means a user-configured
//! program (a messenger CLI, `wl-copy`, a notifier script...). The message is
//! written to its stdin; title and URL are passed as environment variables.
//! A non-zero exit is treated like a dismissed share sheet.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::message::ShareRequest;
use super::tiers::{NativeShare, ShareError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    /// Parse a whitespace-separated command line; `None` when it is blank
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl NativeShare for CommandShare {
    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        tracing::debug!(program = %self.program, "Sharing via external command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("CIRCULARS_SHARE_TITLE", &request.title)
            .env("CIRCULARS_SHARE_URL", &request.url)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ShareError::Failed(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading stdin reports through its status
            if let Err(e) = stdin.write_all(request.text.as_bytes()).await {
                tracing::debug!("Share command closed stdin early: {}", e);
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ShareError::Failed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            tracing::debug!(%status, "Share command did not complete");
            Err(ShareError::Cancelled)
        }
    }
}
