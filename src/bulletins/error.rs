//! Typed errors for the circulars endpoint

use thiserror::Error;

/// Failure to obtain a usable list of circulars
///
/// Both variants are shown to the user the same way (an error banner with the
/// message); they are kept apart so logs and callers can tell a broken
/// connection from a backend that answered with an explicit failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure, undecodable body, or client setup failure
    #[error("{0}")]
    Transport(String),

    /// The backend answered but the response carries no usable data
    #[error("{0}")]
    Upstream(String),
}

impl FetchError {
    /// Convert a reqwest failure into a transport error with a readable message
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Transport(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            FetchError::Transport(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            FetchError::Transport(format!("Invalid response body: {}", e))
        } else {
            FetchError::Transport(e.to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::Transport(msg) | FetchError::Upstream(msg) => msg,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        let err = FetchError::Upstream("upstream down".to_string());
        assert_eq!(err.to_string(), "upstream down");
        assert_eq!(err.message(), "upstream down");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_flag() {
        assert!(FetchError::Transport("refused".to_string()).is_transport());
    }
}
