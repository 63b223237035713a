//! Terminal application loop
//!
//! Owns the pipeline components and routes terminal input to them. Loads run
//! as background tasks so the UI keeps drawing; the loop sleeps until input,
//! a finished load, a document check result or a tick arrives, applies it, and redraws.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Position, Rect},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use super::events::{join_load, Background, Event, EventHandler, LoadHandle};
use super::state::AppState;
use super::widgets::{
    viewer::viewer_area, BannerBar, CardList, Header, ShareDialogPanel, StatusLine, ViewerPanel,
};
use crate::app::loader::{LoadController, LoadTicket};
use crate::app::presenter::{Banner, Presenter, Toast};
use crate::bulletins::{FetchError, FetchedBulletins};
use crate::render::CardAction;
use crate::share::ShareCoordinator;
use crate::theme::ThemePreference;
use crate::viewer::{open_external, OverlayInput, ProbeEvent, ViewerOverlay, ViewerState};

type PendingLoad = (LoadTicket, LoadHandle);

pub struct App<B: Backend> {
    terminal: Terminal<B>,
    state: AppState,
    overlay: ViewerOverlay,
    loader: LoadController,
    sharer: ShareCoordinator,
    theme: ThemePreference,
    opener: Option<String>,
    pending_load: Option<PendingLoad>,
    probe_events: Option<UnboundedReceiver<ProbeEvent>>,
    events: EventHandler,
    /// Frame area from the last draw, for mouse hit-testing
    frame_area: Rect,
}

impl<B: Backend> App<B> {
    pub fn new(
        terminal: Terminal<B>,
        loader: LoadController,
        overlay: ViewerOverlay,
        sharer: ShareCoordinator,
        theme: ThemePreference,
    ) -> Self {
        Self {
            terminal,
            state: AppState::new(),
            overlay,
            loader,
            sharer,
            theme,
            opener: None,
            pending_load: None,
            probe_events: None,
            events: EventHandler::default(),
            frame_area: Rect::default(),
        }
    }

    pub fn with_probe_events(mut self, events: UnboundedReceiver<ProbeEvent>) -> Self {
        self.probe_events = Some(events);
        self
    }

    pub fn with_opener(mut self, opener: Option<String>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.events = EventHandler::new(tick_rate);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn overlay(&self) -> &ViewerOverlay {
        &self.overlay
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Apply the stored theme and kick off the first load
    pub fn init(&mut self) {
        self.theme.init(&mut self.state);
        self.start_refresh();
    }

    /// Run the main event loop until the user quits
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.init();
        self.events.listen();

        while !self.state.should_quit {
            self.state.tick(Instant::now());
            self.draw()?;

            let background = Background {
                load: self.pending_load.as_mut().map(|(_, handle)| handle),
                probe: self.probe_events.as_mut(),
            };
            let event = self.events.next(background).await?;
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Loaded(result) => self.apply_load(result),
                Event::Probe(event) => {
                    self.apply_probe(event);
                }
                Event::Key(_) | Event::Resize(_, _) | Event::Tick => {}
            }
        }

        self.overlay.close();
        if let Some((_, handle)) = self.pending_load.take() {
            handle.abort();
        }
        Ok(())
    }

    /// Start a background load unless one is already running
    pub fn start_refresh(&mut self) {
        let Some(ticket) = self.loader.begin(&mut self.state) else {
            return;
        };
        let source = self.loader.source();
        let handle = tokio::spawn(async move { source.fetch_bulletins().await });
        self.pending_load = Some((ticket, handle));
    }

    /// Wait for the background load and apply it
    pub async fn finish_refresh(&mut self) -> bool {
        let Some((_, handle)) = self.pending_load.as_mut() else {
            return false;
        };
        let result = join_load(handle).await;
        self.apply_load(result);
        true
    }

    fn apply_load(&mut self, result: Result<FetchedBulletins, FetchError>) {
        if let Some((ticket, _)) = self.pending_load.take() {
            self.loader.finish(ticket, result, &mut self.state);
        }
    }

    /// Drain queued document check results. Returns true when any applied.
    pub fn poll_probe(&mut self) -> bool {
        let mut changed = false;
        loop {
            let Some(event) = self
                .probe_events
                .as_mut()
                .and_then(|events| events.try_recv().ok())
            else {
                break;
            };
            changed |= self.apply_probe(event);
        }
        changed
    }

    /// Apply a document check result for the current load; results of earlier loads are dropped
    fn apply_probe(&mut self, event: ProbeEvent) -> bool {
        if self.overlay.surface().load_id() != Some(event.load_id()) {
            tracing::debug!(
                url = event.url(),
                load_id = event.load_id(),
                "Dropping stale document check result"
            );
            return false;
        }
        match event {
            ProbeEvent::Loaded { info, .. } => {
                self.state.document_info = Some(info);
            }
            ProbeEvent::Failed { reason, .. } => {
                if let Some(warning) = self.overlay.report_load_failure(&reason) {
                    self.state.show_banner(Banner::warning(warning.message));
                }
            }
        }
        true
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.should_quit = true;
            return;
        }

        if self.state.share_dialog.is_some() {
            self.handle_dialog_key(key).await;
        } else if self.overlay.is_open() {
            self.handle_viewer_key(key);
        } else {
            self.handle_list_key(key).await;
        }
    }

    async fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.share_dialog = None,
            KeyCode::Char('c') => {
                if let Some(dialog) = self.state.share_dialog.as_mut() {
                    dialog.copy(self.sharer.clipboard()).await;
                }
            }
            KeyCode::Char('q') => self.state.should_quit = true,
            _ => {}
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.overlay.handle_input(OverlayInput::CancelKey);
                self.state.document_info = None;
            }
            KeyCode::Char('o') => {
                if let ViewerState::Open { url, .. } = self.overlay.state() {
                    let url = url.clone();
                    self.open_link(&url);
                }
            }
            KeyCode::Char('q') => self.state.should_quit = true,
            _ => {
                self.overlay.handle_input(OverlayInput::OtherKey);
            }
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('r') => self.start_refresh(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.state.select_previous(),
            KeyCode::Enter | KeyCode::Char('v') => self.view_selected(),
            KeyCode::Char('s') => self.share_selected().await,
            KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('d') => {
                self.theme.toggle(&mut self.state);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            || !self.overlay.is_open()
        {
            return;
        }
        let inside = viewer_area(self.frame_area).contains(Position::new(mouse.column, mouse.row));
        let input = if inside {
            OverlayInput::ClickInside
        } else {
            OverlayInput::ClickOutside
        };
        if self.overlay.handle_input(input) {
            self.state.document_info = None;
        }
    }

    fn view_selected(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        if let CardAction::View { link, title } = card.actions.view.clone() {
            self.state.document_info = None;
            self.overlay.open(&link, Some(title.as_str()));
        }
    }

    async fn share_selected(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        if let CardAction::Share(bulletin) = card.actions.share.clone() {
            self.sharer.share(&bulletin, &mut self.state).await;
        }
    }

    fn open_selected(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        if let CardAction::OpenExternal(link) = card.actions.open_external.clone() {
            self.open_link(&link);
        }
    }

    fn open_link(&mut self, link: &str) {
        if let Err(e) = open_external(link, self.opener.as_deref()) {
            tracing::warn!("Failed to open document externally: {:#}", e);
            self.state
                .show_toast(Toast::new(format!("Could not open document: {}", e)));
        }
    }

    pub fn draw(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let state = &self.state;
        let overlay = &self.overlay;
        let completed = self.terminal.draw(|frame| render(frame, state, overlay, now))?;
        self.frame_area = completed.area;
        Ok(())
    }
}

fn render(frame: &mut Frame, state: &AppState, overlay: &ViewerOverlay, now: Instant) {
    let area = frame.area();
    let banner_height = if state.banner.is_some() { 1 } else { 0 };
    let [header, banner, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Header::new(state), header);
    if let Some(current) = &state.banner {
        frame.render_widget(BannerBar::new(current, &state.theme), banner);
    }
    frame.render_widget(CardList::new(state, now), body);
    frame.render_widget(
        StatusLine::new(&state.theme).toast(state.toast.as_ref().map(|(toast, _)| toast)),
        status,
    );

    if let ViewerState::Open { url, title } = overlay.state() {
        frame.render_widget(
            ViewerPanel::new(title, url, &state.theme).info(state.document_info.as_ref()),
            area,
        );
    }
    if let Some(dialog) = &state.share_dialog {
        frame.render_widget(ShareDialogPanel::new(dialog, &state.theme), area);
    }
}
