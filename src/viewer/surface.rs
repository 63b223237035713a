//! Viewing surfaces
//!
//! `MemorySurface` only remembers its source, the way an embedded frame does
//! before anything paints. `ProbeSurface` fetches the document's headers in a
//! background task so the terminal overlay can show what the link points at;
//! clearing it aborts that task. Every `load` gets a fresh id, and probe
//! results carry the id of the load that started them.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::ViewingSurface;

/// Surface that records what it was asked to load
#[derive(Debug, Default)]
pub struct MemorySurface {
    source: Option<String>,
    loads: u64,
}

impl MemorySurface {
    /// Number of `load` calls so far
    pub fn loads(&self) -> u64 {
        self.loads
    }
}

impl ViewingSurface for MemorySurface {
    fn load(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.loads += 1;
    }

    fn clear(&mut self) {
        self.source = None;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load_id(&self) -> Option<u64> {
        self.source.as_ref().map(|_| self.loads)
    }
}

/// What the probe learned about a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Result of a background probe, tagged with the load it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    Loaded {
        load_id: u64,
        url: String,
        info: DocumentInfo,
    },
    Failed {
        load_id: u64,
        url: String,
        reason: String,
    },
}

impl ProbeEvent {
    pub fn load_id(&self) -> u64 {
        match self {
            ProbeEvent::Loaded { load_id, .. } | ProbeEvent::Failed { load_id, .. } => *load_id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ProbeEvent::Loaded { url, .. } | ProbeEvent::Failed { url, .. } => url,
        }
    }
}

/// Surface that requests the document and reports its headers
pub struct ProbeSurface {
    client: reqwest::Client,
    source: Option<String>,
    loads: u64,
    task: Option<JoinHandle<()>>,
    events: UnboundedSender<ProbeEvent>,
}

impl ProbeSurface {
    pub fn new(client: reqwest::Client, events: UnboundedSender<ProbeEvent>) -> Self {
        Self {
            client,
            source: None,
            loads: 0,
            task: None,
            events,
        }
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl ViewingSurface for ProbeSurface {
    fn load(&mut self, url: &str) {
        self.cancel();
        self.source = Some(url.to_string());
        self.loads += 1;
        let load_id = self.loads;

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            let _ = self.events.send(ProbeEvent::Failed {
                load_id,
                url: url.to_string(),
                reason: "no async runtime available".to_string(),
            });
            return;
        };

        let client = self.client.clone();
        let events = self.events.clone();
        let url = url.to_string();
        self.task = Some(handle.spawn(async move {
            let event = probe(&client, load_id, &url).await;
            let _ = events.send(event);
        }));
    }

    fn clear(&mut self) {
        self.cancel();
        self.source = None;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load_id(&self) -> Option<u64> {
        self.source.as_ref().map(|_| self.loads)
    }
}

impl Drop for ProbeSurface {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn probe(client: &reqwest::Client, load_id: u64, url: &str) -> ProbeEvent {
    let failed = |reason: String| ProbeEvent::Failed {
        load_id,
        url: url.to_string(),
        reason,
    };

    // Only headers are read; dropping the response abandons the body
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return failed(e.to_string()),
    };

    let status = response.status();
    if !status.is_success() {
        return failed(format!("HTTP {}", status));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    ProbeEvent::Loaded {
        load_id,
        url: url.to_string(),
        info: DocumentInfo {
            content_type,
            content_length: response.content_length(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_memory_surface_tracks_source() {
        let mut surface = MemorySurface::default();
        surface.load("https://x/a.pdf");
        surface.load("https://x/b.pdf");
        assert_eq!(surface.source(), Some("https://x/b.pdf"));
        assert_eq!(surface.loads(), 2);
        assert_eq!(surface.load_id(), Some(2));
        surface.clear();
        assert_eq!(surface.source(), None);
        assert_eq!(surface.load_id(), None);
    }

    #[tokio::test]
    async fn test_reloading_same_url_gets_new_load_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ProbeSurface::new(reqwest::Client::new(), tx);
        surface.load("http://127.0.0.1:1/doc.pdf");
        let first = surface.load_id();
        surface.clear();
        surface.load("http://127.0.0.1:1/doc.pdf");
        let second = surface.load_id();
        assert_ne!(first, second);

        // The first probe may have reported before its abort landed
        loop {
            let event = rx.recv().await.unwrap();
            if Some(event.load_id()) == second {
                break;
            }
            assert_eq!(Some(event.load_id()), first);
        }
    }

    #[tokio::test]
    async fn test_document_failure_is_reported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ProbeSurface::new(reqwest::Client::new(), tx);
        surface.load("http://127.0.0.1:1/doc.pdf");
        assert_eq!(surface.source(), Some("http://127.0.0.1:1/doc.pdf"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.url(), "http://127.0.0.1:1/doc.pdf");
        assert!(matches!(event, ProbeEvent::Failed { .. }));
    }

    #[tokio::test]
    async fn test_clear_cancels_document_check() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ProbeSurface::new(reqwest::Client::new(), tx);
        surface.load("http://127.0.0.1:1/doc.pdf");
        surface.clear();
        assert_eq!(surface.source(), None);
        drop(surface);

        // Either the aborted task never reports, or it raced the abort; the
        // channel must close once the surface and its task are gone.
        while let Some(event) = rx.recv().await {
            assert_eq!(event.url(), "http://127.0.0.1:1/doc.pdf");
        }
    }

    #[test]
    fn test_load_without_runtime_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ProbeSurface::new(reqwest::Client::new(), tx);
        surface.load("https://x/a.pdf");
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, ProbeEvent::Failed { reason, .. } if reason.contains("runtime")));
    }
}
