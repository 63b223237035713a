//! Event source for the terminal loop
//!
//! Terminal input is read on a blocking task and forwarded over a channel.
//! [`EventHandler::next`] waits on that channel together with the background
//! load, the document check and the animation tick, so the loop wakes as soon
//! as any of them has something to apply.

use std::future;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::bulletins::{FetchError, FetchedBulletins};
use crate::viewer::ProbeEvent;

/// How long the reader blocks before checking whether the loop is gone
const READ_POLL: Duration = Duration::from_millis(50);

pub type LoadHandle = JoinHandle<Result<FetchedBulletins, FetchError>>;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Timers: card reveal, toast expiry, copy feedback
    Tick,
    /// The background fetch finished
    Loaded(Result<FetchedBulletins, FetchError>),
    /// The document check reported back
    Probe(ProbeEvent),
}

/// Background work the loop is waiting on
#[derive(Default)]
pub struct Background<'a> {
    pub load: Option<&'a mut LoadHandle>,
    pub probe: Option<&'a mut UnboundedReceiver<ProbeEvent>>,
}

pub struct EventHandler {
    tick_rate: Duration,
    ticks: Option<Interval>,
    input: Option<UnboundedReceiver<io::Result<Event>>>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            ticks: None,
            input: None,
        }
    }

    /// Start reading terminal input. The reader stops once the handler is dropped.
    pub fn listen(&mut self) {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || read_terminal(tx));
        self.input = Some(rx);
    }

    /// Wait for the next terminal event, background result or tick
    pub async fn next(&mut self, background: Background<'_>) -> io::Result<Event> {
        let tick_rate = self.tick_rate;
        let ticks = self.ticks.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(tick_rate);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        tokio::select! {
            input = recv_or_pending(self.input.as_mut()) => input,
            result = join_or_pending(background.load) => Ok(Event::Loaded(result)),
            probe = recv_or_pending(background.probe) => Ok(Event::Probe(probe)),
            _ = ticks.tick() => Ok(Event::Tick),
        }
    }
}

/// Wait for a load task, mapping a panicked or aborted task to a transport error
pub async fn join_load(handle: &mut LoadHandle) -> Result<FetchedBulletins, FetchError> {
    handle
        .await
        .unwrap_or_else(|e| Err(FetchError::Transport(format!("load task failed: {}", e))))
}

async fn join_or_pending(handle: Option<&mut LoadHandle>) -> Result<FetchedBulletins, FetchError> {
    match handle {
        Some(handle) => join_load(handle).await,
        None => future::pending().await,
    }
}

/// Next message, or never when there is no channel or it has closed
async fn recv_or_pending<T>(rx: Option<&mut UnboundedReceiver<T>>) -> T {
    if let Some(rx) = rx {
        if let Some(value) = rx.recv().await {
            return value;
        }
    }
    future::pending().await
}

fn read_terminal(tx: UnboundedSender<io::Result<Event>>) {
    while !tx.is_closed() {
        let event = match event::poll(READ_POLL) {
            Ok(false) => continue,
            Ok(true) => event::read(),
            Err(e) => Err(e),
        };
        let event = match event {
            Ok(CrosstermEvent::Key(key)) => Ok(Event::Key(key)),
            Ok(CrosstermEvent::Mouse(mouse)) => Ok(Event::Mouse(mouse)),
            Ok(CrosstermEvent::Resize(w, h)) => Ok(Event::Resize(w, h)),
            Ok(_) => continue,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tick_without_background_work() {
        let mut events = EventHandler::new(Duration::from_millis(5));
        assert!(matches!(
            events.next(Background::default()).await,
            Ok(Event::Tick)
        ));
    }

    #[tokio::test]
    async fn test_wakes_on_finished_load() {
        let mut events = EventHandler::new(Duration::from_secs(3600));
        // Consume the immediate first tick
        events.next(Background::default()).await.unwrap();

        let mut handle: LoadHandle = tokio::spawn(async { Ok(FetchedBulletins::default()) });
        let event = events
            .next(Background {
                load: Some(&mut handle),
                probe: None,
            })
            .await
            .unwrap();
        assert!(matches!(event, Event::Loaded(Ok(fetched)) if fetched.bulletins.is_empty()));
    }

    #[tokio::test]
    async fn test_aborted_load_becomes_transport_error() {
        let mut handle: LoadHandle = tokio::spawn(future::pending());
        handle.abort();
        assert!(matches!(
            join_load(&mut handle).await,
            Err(FetchError::Transport(reason)) if reason.contains("load task failed")
        ));
    }

    #[tokio::test]
    async fn test_wakes_on_document_check_result() {
        let mut events = EventHandler::new(Duration::from_secs(3600));
        events.next(Background::default()).await.unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(ProbeEvent::Failed {
            load_id: 1,
            url: "https://x/a.pdf".to_string(),
            reason: "HTTP 404".to_string(),
        })
        .unwrap();
        let event = events
            .next(Background {
                load: None,
                probe: Some(&mut rx),
            })
            .await
            .unwrap();
        assert!(matches!(event, Event::Probe(ProbeEvent::Failed { load_id: 1, .. })));
    }
}
