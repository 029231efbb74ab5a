//! Directions client error types.

use std::fmt;

use super::convert::DecodeError;

/// Errors from the directions HTTP client.
#[derive(Debug)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Response parsed but contained no usable route
    Decode(DecodeError),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(e) => write!(f, "HTTP error: {e}"),
            DirectionsError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            DirectionsError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            DirectionsError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            DirectionsError::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(e) => Some(e),
            DirectionsError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

impl From<DecodeError> for DirectionsError {
    fn from(err: DecodeError) -> Self {
        DirectionsError::Decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DirectionsError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (invalid API key)");

        let err = DirectionsError::ApiError {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = DirectionsError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));

        let err = DirectionsError::Decode(DecodeError::NoUsableRoutes { excluded: 2 });
        assert!(err.to_string().contains("no usable route"));
    }
}
