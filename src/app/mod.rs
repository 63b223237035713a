//! Application glue shared by the terminal UI and the CLI commands

pub mod loader;
pub mod presenter;

pub use loader::{LoadController, LoadOutcome, LoadTicket};
pub use presenter::{Banner, BannerKind, Presenter, RecordingPresenter, Toast};
