//! Authentication for Waypoint
//!
//! Provides:
//! - Authorization header parsing (`Bearer <token>`)
//! - Unverified claim extraction from bearer credentials
//!
//! No cryptographic verification happens anywhere in this module; see
//! [`claims::UnverifiedClaims`] for the documented trust boundary.

pub mod claims;

pub use claims::UnverifiedClaims;

use crate::types::{Result, WaypointError};

/// Parse an Authorization header and decode the bearer credential it carries.
///
/// The header must be exactly two whitespace-separated parts with a
/// case-insensitive `bearer` scheme. Anything else is a client error.
pub fn authenticate(auth_header: Option<&str>) -> Result<UnverifiedClaims> {
    let header = match auth_header {
        Some(h) if !h.trim().is_empty() => h,
        _ => return Err(WaypointError::MissingAuth),
    };

    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(WaypointError::InvalidAuthHeader);
    }

    UnverifiedClaims::decode(parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn bearer_for(sub: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{}"}}"#, sub));
        format!("Bearer h.{}.s", payload)
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(authenticate(None), Err(WaypointError::MissingAuth)));
        assert!(matches!(authenticate(Some("")), Err(WaypointError::MissingAuth)));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(matches!(
            authenticate(Some("Token abc.def.ghi")),
            Err(WaypointError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn test_wrong_part_count() {
        assert!(matches!(
            authenticate(Some("Bearer")),
            Err(WaypointError::InvalidAuthHeader)
        ));
        assert!(matches!(
            authenticate(Some("Bearer one two")),
            Err(WaypointError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = bearer_for("alice").replace("Bearer", "bEaReR");
        let claims = authenticate(Some(&header)).unwrap();
        assert_eq!(claims.subject(), Some("alice"));
    }

    #[test]
    fn test_valid_bearer() {
        let header = bearer_for("user-42");
        let claims = authenticate(Some(&header)).unwrap();
        assert_eq!(claims.subject(), Some("user-42"));
    }

    #[test]
    fn test_malformed_token_propagates_decode_error() {
        let err = authenticate(Some("Bearer notthreesegments")).unwrap_err();
        assert!(matches!(err, WaypointError::MalformedCredential(_)));
    }
}
