//! Load / refresh driver
//!
//! Ties the list client to the renderer and the presenter. A load disables
//! the refresh control, clears the list and any banner, fetches, renders, and
//! re-enables the control whatever happened.
//!
//! The split `begin` / `finish` API lets a frontend run the fetch in the
//! background and keep drawing; `load` does both in one call.

use std::sync::Arc;

use super::presenter::{Banner, Presenter};
use crate::bulletins::{Bulletin, BulletinSource, FetchError, FetchedBulletins};
use crate::render::render;

pub const REFRESH_LABEL: &str = "Refresh";
pub const LOADING_LABEL: &str = "Loading...";
pub const LOADING_TEXT: &str = "Loading circulars...";
pub const FALLBACK_WARNING: &str =
    "⚠️ Showing sample data - The DTE website cannot be accessed from this deployment environment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize, used_fallback: bool },
    Failed(FetchError),
    /// A load from the same trigger was still in flight
    Skipped,
}

/// Proof that a load was started; consumed by [`LoadController::finish`]
#[derive(Debug)]
#[must_use = "a started load must be finished to re-enable the refresh control"]
pub struct LoadTicket {
    _private: (),
}

pub struct LoadController {
    source: Arc<dyn BulletinSource>,
    in_flight: bool,
    bulletins: Vec<Bulletin>,
}

impl LoadController {
    pub fn new(source: Arc<dyn BulletinSource>) -> Self {
        Self {
            source,
            in_flight: false,
            bulletins: Vec::new(),
        }
    }

    pub fn source(&self) -> Arc<dyn BulletinSource> {
        self.source.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Bulletins from the last successful load, in display order
    pub fn bulletins(&self) -> &[Bulletin] {
        &self.bulletins
    }

    pub fn find(&self, serial_number: u32) -> Option<&Bulletin> {
        self.bulletins
            .iter()
            .find(|b| b.serial_number == serial_number)
    }

    /// Start a load. Returns `None` while another load is in flight.
    pub fn begin(&mut self, presenter: &mut dyn Presenter) -> Option<LoadTicket> {
        if self.in_flight {
            tracing::debug!("Load already in flight, ignoring trigger");
            return None;
        }
        self.in_flight = true;

        presenter.set_loading(true);
        presenter.clear_banner();
        presenter.clear_cards();
        presenter.set_refresh_control(false, LOADING_LABEL);
        Some(LoadTicket { _private: () })
    }

    /// Apply a fetch result and release the refresh control
    pub fn finish(
        &mut self,
        ticket: LoadTicket,
        result: Result<FetchedBulletins, FetchError>,
        presenter: &mut dyn Presenter,
    ) -> LoadOutcome {
        let LoadTicket { .. } = ticket;

        let outcome = match result {
            Ok(fetched) => {
                let cards = render(&fetched.bulletins);
                presenter.show_cards(&cards);
                if fetched.used_fallback {
                    presenter.show_banner(Banner::warning(FALLBACK_WARNING));
                }
                tracing::info!(
                    count = fetched.bulletins.len(),
                    used_fallback = fetched.used_fallback,
                    "Circulars loaded"
                );
                let outcome = LoadOutcome::Loaded {
                    count: fetched.bulletins.len(),
                    used_fallback: fetched.used_fallback,
                };
                self.bulletins = fetched.bulletins;
                outcome
            }
            Err(e) => {
                tracing::error!("Error fetching circulars: {}", e);
                presenter.show_banner(Banner::error(format!("Failed to load circulars: {}", e)));
                self.bulletins.clear();
                LoadOutcome::Failed(e)
            }
        };

        presenter.set_loading(false);
        presenter.set_refresh_control(true, REFRESH_LABEL);
        self.in_flight = false;
        outcome
    }

    /// Fetch and render in one go
    pub async fn load(&mut self, presenter: &mut dyn Presenter) -> LoadOutcome {
        let Some(ticket) = self.begin(presenter) else {
            return LoadOutcome::Skipped;
        };
        let result = self.source.fetch_bulletins().await;
        self.finish(ticket, result, presenter)
    }
}
