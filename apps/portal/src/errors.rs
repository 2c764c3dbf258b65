use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Client-level error type shared across the portal modules.
///
/// Empty collections and "no matches" are ordinary `Ok` values, never errors.
/// Nothing here is fatal to the process; the worst outcome is landing back on
/// the unauthenticated view.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Malformed or conflicting input reported by the backend, recoverable by
    /// the user correcting the form. Carries the backend message verbatim.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad credentials, or the backend rejected our authorization header.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The request could not complete at the transport level.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A protected resource is gone, e.g. deleting an already-deleted posting.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with a status outside the taxonomy.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The credential store could not be read or written.
    #[error("Credential storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PortalError {
    /// Failures worth surfacing as a retryable banner rather than a dead end.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PortalError::Network(_))
    }

    /// Failures that must force the Access Gate back to `Unauthenticated`.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PortalError::Auth(_))
    }

    /// Maps a backend rejection to the taxonomy. 401/403 are authorization
    /// failures, 404 stays recoverable, anything else in the 4xx range is
    /// user-correctable input.
    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            PortalError::Auth(message)
        } else if status == StatusCode::NOT_FOUND {
            PortalError::NotFound(message)
        } else if status.is_client_error() {
            PortalError::Validation(message)
        } else {
            PortalError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Error bodies: routes answer `{"error": …}`, the auth middleware
/// `{"message": …}`. Whichever is present wins; otherwise the raw body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Pulls the human-readable message out of a failed response, preserving the
/// backend wording verbatim for display.
pub(crate) async fn read_error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error.or(parsed.message).unwrap_or(body),
        Err(_) => body,
    }
}
