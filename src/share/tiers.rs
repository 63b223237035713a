//! Share capabilities and per-tier outcomes

use async_trait::async_trait;
use thiserror::Error;

use super::message::ShareRequest;

/// Result of one attempt in the share chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    Delivered,
    /// The capability is not present in this environment
    Unsupported,
    /// The user dismissed the share target
    Cancelled,
    Failed(String),
}

impl TierOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, TierOutcome::Delivered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("native share is not supported")]
    Unsupported,
    #[error("share was cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,
    #[error("clipboard write failed: {0}")]
    Backend(String),
}

/// Platform content-sharing capability
#[async_trait]
pub trait NativeShare: Send + Sync {
    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// System clipboard write capability
#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

impl From<Result<(), ShareError>> for TierOutcome {
    fn from(result: Result<(), ShareError>) -> Self {
        match result {
            Ok(()) => TierOutcome::Delivered,
            Err(ShareError::Unsupported) => TierOutcome::Unsupported,
            Err(ShareError::Cancelled) => TierOutcome::Cancelled,
            Err(ShareError::Failed(reason)) => TierOutcome::Failed(reason),
        }
    }
}

impl From<Result<(), ClipboardError>> for TierOutcome {
    fn from(result: Result<(), ClipboardError>) -> Self {
        match result {
            Ok(()) => TierOutcome::Delivered,
            Err(ClipboardError::Unavailable) => TierOutcome::Unsupported,
            Err(ClipboardError::Backend(reason)) => TierOutcome::Failed(reason),
        }
    }
}
