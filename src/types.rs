//! Error types for Waypoint
//!
//! Every failure a request can hit maps onto one of these variants. The
//! HTTP boundary uses [`WaypointError::status_code`] to translate the
//! taxonomy into response codes.

use hyper::StatusCode;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, WaypointError>;

/// Waypoint error taxonomy
///
/// The first five variants are the request-visible taxonomy; their Display
/// text is surfaced verbatim in the `{"error": ...}` response body, so the
/// wording is part of the API contract.
#[derive(Debug, Error)]
pub enum WaypointError {
    /// No Authorization header was presented
    #[error("Authorization header missing")]
    MissingAuth,

    /// Authorization header present but not `Bearer <token>`
    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    /// Bearer credential failed structural decode or claim parsing
    ///
    /// Carries the underlying decode message. Exposing the cause text is an
    /// accepted information leak, not hardened.
    #[error("Error decoding token: {0}")]
    MalformedCredential(String),

    /// No trip exists for (authenticated subject, trip_id)
    #[error("Trip not found")]
    TripNotFound,

    /// A downstream store read failed; terminal for the request, no retries
    #[error("{0}")]
    StoreUnavailable(String),

    /// Response payload could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (listener bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaypointError {
    /// HTTP status code for this error at the response boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            WaypointError::MissingAuth
            | WaypointError::InvalidAuthHeader
            | WaypointError::MalformedCredential(_) => StatusCode::UNAUTHORIZED,
            WaypointError::TripNotFound => StatusCode::NOT_FOUND,
            WaypointError::StoreUnavailable(_)
            | WaypointError::Serialization(_)
            | WaypointError::Config(_)
            | WaypointError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WaypointError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(WaypointError::InvalidAuthHeader.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WaypointError::MalformedCredential("bad".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(WaypointError::TripNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WaypointError::StoreUnavailable("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_contractual_messages() {
        assert_eq!(WaypointError::MissingAuth.to_string(), "Authorization header missing");
        assert_eq!(
            WaypointError::InvalidAuthHeader.to_string(),
            "Invalid Authorization header format"
        );
        assert_eq!(WaypointError::TripNotFound.to_string(), "Trip not found");
        assert_eq!(
            WaypointError::MalformedCredential("expected 3 segments".into()).to_string(),
            "Error decoding token: expected 3 segments"
        );
    }
}
