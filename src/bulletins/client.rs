//! Bulletin list client
//!
//! Issues one GET per call and classifies the envelope. UI effects (banners,
//! disabling the refresh control) are left to the caller.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use super::error::FetchError;
use super::types::{FetchedBulletins, ResponseEnvelope};
use crate::config::HttpConfig;

/// Anything that can produce the current list of circulars
#[async_trait]
pub trait BulletinSource: Send + Sync {
    async fn fetch_bulletins(&self) -> Result<FetchedBulletins, FetchError>;
}

/// HTTP implementation backed by reqwest
pub struct HttpBulletinClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBulletinClient {
    /// Client with no request timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BulletinSource for HttpBulletinClient {
    async fn fetch_bulletins(&self) -> Result<FetchedBulletins, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching circulars");

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::from_network_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(FetchError::from_network_error)?;

        // The backend reports its own failures as JSON with a 5xx status, so the
        // body decides; the status only matters when the body is not an envelope.
        let envelope: ResponseEnvelope = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                FetchError::Transport(format!("Invalid response: {}", e))
            } else {
                FetchError::Transport(format!("HTTP {}", status))
            }
        })?;

        let result = envelope.classify();
        match &result {
            Ok(fetched) => tracing::debug!(
                count = fetched.bulletins.len(),
                used_fallback = fetched.used_fallback,
                %status,
                "Circulars received"
            ),
            Err(e) => tracing::warn!(%status, "Circulars endpoint returned no usable data: {}", e),
        }
        result
    }
}

/// Source that replays a fixed response, for tests and offline demos
pub struct StaticSource {
    response: Mutex<Result<ResponseEnvelope, FetchError>>,
}

impl StaticSource {
    pub fn new(envelope: ResponseEnvelope) -> Self {
        Self {
            response: Mutex::new(Ok(envelope)),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
        }
    }

    /// Replace the response served by subsequent fetches
    pub fn set_response(&self, response: Result<ResponseEnvelope, FetchError>) {
        if let Ok(mut guard) = self.response.lock() {
            *guard = response;
        }
    }
}

#[async_trait]
impl BulletinSource for StaticSource {
    async fn fetch_bulletins(&self) -> Result<FetchedBulletins, FetchError> {
        let response = self
            .response
            .lock()
            .map_err(|_| FetchError::Transport("static source poisoned".to_string()))?
            .clone();
        response?.classify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_classifies() {
        let source = StaticSource::new(ResponseEnvelope {
            ok: false,
            error_message: Some("upstream down".to_string()),
            ..Default::default()
        });
        let err = source.fetch_bulletins().await.unwrap_err();
        assert_eq!(err, FetchError::Upstream("upstream down".to_string()));

        source.set_response(Ok(ResponseEnvelope {
            ok: true,
            ..Default::default()
        }));
        let fetched = source.fetch_bulletins().await.unwrap();
        assert!(fetched.bulletins.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 1 is reserved and never listening in test environments
        let client = HttpBulletinClient::new("http://127.0.0.1:1/api/circulars");
        let err = client.fetch_bulletins().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_from_config_keeps_endpoint() {
        let config = HttpConfig {
            endpoint: "http://localhost:9999/api/circulars".to_string(),
            timeout_secs: Some(3),
        };
        let client = HttpBulletinClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9999/api/circulars");
    }
}
