//! Error types for upstream calls and request parameters.

use thiserror::Error;

/// Failure talking to one of the third-party APIs.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// The service answered 2xx but the payload was not usable.
    #[error("invalid response from {service}: {detail}")]
    InvalidResponse {
        service: &'static str,
        detail: String,
    },
}

/// The `country` query parameter did not name a supported country.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported country code: {0}")]
pub struct UnknownCountry(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_country_message() {
        let err = UnknownCountry("XX".to_string());
        assert_eq!(err.to_string(), "unsupported country code: XX");
    }

    #[test]
    fn test_invalid_response_message() {
        let err = UpstreamError::InvalidResponse {
            service: "randomuser.me",
            detail: "empty results".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid response from randomuser.me: empty results"
        );
    }
}
