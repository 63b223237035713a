//! Document viewer overlay
//!
//! A two-state machine around a single viewing surface. Closing clears the
//! surface's source, which cancels an in-flight load rather than hiding it.
//! Opening while open replaces the current session.

pub mod external;
pub mod surface;

pub use external::{default_opener, open_external};
pub use surface::{DocumentInfo, MemorySurface, ProbeEvent, ProbeSurface};

/// Title used when a caller does not provide one
pub const DEFAULT_TITLE: &str = "PDF Viewer";

pub const LOAD_FAILURE_MESSAGE: &str =
    "Failed to load PDF. You can try opening it in a new tab instead.";

/// The component that actually renders (or fetches) a document
pub trait ViewingSurface: Send {
    /// Start loading `url`, replacing whatever was loaded before
    fn load(&mut self, url: &str);

    /// Drop the current source and cancel any in-flight load
    fn clear(&mut self);

    /// Currently loaded source, `None` once cleared
    fn source(&self) -> Option<&str>;

    /// Id of the current load; a new one is issued on every `load`
    fn load_id(&self) -> Option<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        url: String,
        title: String,
    },
}

/// User input routed to the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    /// The explicit close button
    CloseControl,
    /// A click that landed outside the overlay's content region
    ClickOutside,
    ClickInside,
    /// The designated cancel key (Esc)
    CancelKey,
    OtherKey,
}

/// Non-fatal report that the surface could not load the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerWarning {
    pub message: String,
    pub reason: String,
}

pub struct ViewerOverlay {
    state: ViewerState,
    surface: Box<dyn ViewingSurface>,
}

impl ViewerOverlay {
    pub fn new(surface: Box<dyn ViewingSurface>) -> Self {
        Self {
            state: ViewerState::Closed,
            surface,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    pub fn surface(&self) -> &dyn ViewingSurface {
        self.surface.as_ref()
    }

    /// Open `link` in the viewing surface, replacing any open session
    pub fn open(&mut self, link: &str, title: Option<&str>) {
        let url = decode_link(link);
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        if self.is_open() {
            tracing::debug!("Replacing open viewer session");
        }
        tracing::debug!(%url, %title, "Opening document viewer");

        self.surface.load(&url);
        self.state = ViewerState::Open { url, title };
    }

    /// Close the overlay. Returns false when it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.surface.clear();
        self.state = ViewerState::Closed;
        tracing::debug!("Document viewer closed");
        true
    }

    /// Route an input event; returns true when it closed the overlay
    pub fn handle_input(&mut self, input: OverlayInput) -> bool {
        match input {
            OverlayInput::CloseControl | OverlayInput::ClickOutside | OverlayInput::CancelKey => {
                self.close()
            }
            OverlayInput::ClickInside | OverlayInput::OtherKey => false,
        }
    }

    /// Turn a surface load failure into a warning, leaving the overlay open.
    ///
    /// Returns `None` when the overlay is closed: the failed load was already
    /// cancelled and there is nothing to warn about.
    pub fn report_load_failure(&self, reason: &str) -> Option<ViewerWarning> {
        if !self.is_open() {
            tracing::debug!("Ignoring load failure for closed viewer: {}", reason);
            return None;
        }
        tracing::warn!("Error loading PDF: {}", reason);
        Some(ViewerWarning {
            message: LOAD_FAILURE_MESSAGE.to_string(),
            reason: reason.to_string(),
        })
    }
}

/// Percent-decode a document link, keeping it as-is when it does not decode to UTF-8
pub fn decode_link(link: &str) -> String {
    match urlencoding::decode(link) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!("Link is not valid percent-encoded UTF-8 ({}), using raw", e);
            link.to_string()
        }
    }
}
