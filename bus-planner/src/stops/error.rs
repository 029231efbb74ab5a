//! Stop-catalogue API error types.

/// Errors that can occur when interacting with the stop-catalogue API.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TRANSIT_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the stop-catalogue API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A stop coordinate could not be parsed
    #[error("invalid stop coordinate: {value}")]
    InvalidCoordinate { value: String },
}
