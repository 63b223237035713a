//! circulars: terminal client for the DTE circulars feed
//!
//! This library provides:
//! - An HTTP client for the circulars endpoint, tolerant of degraded responses
//! - Card rendering with escaping and day-first date formatting
//! - A document viewer overlay with a background probe
//! - Sharing through a native command, the clipboard, or a manual copy dialog
//! - A persisted dark mode preference
//! - A terminal UI (TUI) and non-interactive CLI commands

pub mod app;
pub mod bulletins;
pub mod commands;
pub mod config;
pub mod render;
pub mod share;
pub mod theme;
pub mod tui;
pub mod viewer;

pub use config::Config;
