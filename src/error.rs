//! Error types for the Spotify API and the comparison pipeline.

use thiserror::Error;

/// Main error type for all playlist-compare operations.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Too many requests (HTTP 429).
    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    /// Token rejected by the API (HTTP 401).
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    /// Access to the resource is not allowed (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource does not exist (HTTP 404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other API failure.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// The token endpoint refused the client credentials.
    #[error("Spotify authentication failed: {0}")]
    AuthFailed(String),

    /// Client id or secret was empty.
    #[error("Missing client credentials")]
    MissingCredentials,

    /// Playlist id, URI or URL could not be understood.
    #[error("Invalid playlist id: {0}")]
    InvalidId(String),

    /// Response did not contain the expected data.
    #[error("No data from API: {0}")]
    NoData(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl SpotifyError {
    /// Classify a failed HTTP status into an error variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => SpotifyError::RateLimited,
            401 => SpotifyError::Unauthorized(message),
            403 => SpotifyError::Forbidden(message),
            404 => SpotifyError::NotFound(message),
            _ => SpotifyError::ApiError(message),
        }
    }
}

/// Result type alias for playlist-compare operations.
pub type Result<T> = std::result::Result<T, SpotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            SpotifyError::from_status(429, "slow down"),
            SpotifyError::RateLimited
        ));
        assert!(matches!(
            SpotifyError::from_status(401, "expired"),
            SpotifyError::Unauthorized(m) if m == "expired"
        ));
        assert!(matches!(
            SpotifyError::from_status(403, "nope"),
            SpotifyError::Forbidden(_)
        ));
        assert!(matches!(
            SpotifyError::from_status(404, "gone"),
            SpotifyError::NotFound(_)
        ));
        assert!(matches!(
            SpotifyError::from_status(500, "boom"),
            SpotifyError::ApiError(_)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SpotifyError::RateLimited.to_string(),
            "Rate limit exceeded. Try again later."
        );
        assert_eq!(
            SpotifyError::NotFound("Invalid playlist Id".into()).to_string(),
            "Resource not found: Invalid playlist Id"
        );
    }
}
