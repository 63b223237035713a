//! Open a document link outside the terminal

use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

/// Platform opener used when none is configured
pub fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

fn resolve_opener(configured: Option<&str>) -> &str {
    configured.unwrap_or(default_opener())
}

/// Hand `link` to the opener. Only http(s) URLs are passed on.
pub fn open_external(link: &str, opener: Option<&str>) -> Result<()> {
    let decoded = super::decode_link(link);
    let url = url::Url::parse(&decoded).with_context(|| format!("Invalid link: {}", decoded))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Refusing to open {} link", url.scheme());
    }

    let opener = resolve_opener(opener);
    let mut parts = opener.split_whitespace();
    let program = parts.next().context("Opener command is empty")?;

    tracing::debug!(%url, program, "Opening link externally");
    Command::new(program)
        .args(parts)
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {}", program))?;
    Ok(())
}
