//! Unverified bearer credential decoding
//!
//! A bearer credential is expected to be a three-segment, dot-separated
//! structure (header, payload, signature). Only the payload is decoded; the
//! signature segment is structurally required but **never verified**. Any
//! `sub` claim in a structurally valid credential is trusted to own the trips
//! it looks up. The type is named [`UnverifiedClaims`] so that trust gap is
//! visible at every call site; closing it means introducing a distinct
//! verified-claims type, not renaming this one.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::types::{Result, WaypointError};

/// Claim set extracted from a bearer credential without signature verification
#[derive(Debug, Clone)]
pub struct UnverifiedClaims {
    claims: Map<String, Value>,
}

impl UnverifiedClaims {
    /// Decode the payload segment of a three-segment bearer credential.
    ///
    /// Padding handling is tolerant: trailing `=` is stripped and the segment
    /// is decoded unpadded, so missing or surplus padding both decode. This is
    /// an accepted quirk carried over from the original behavior, not a
    /// validation guarantee.
    pub fn decode(token: &str) -> Result<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(WaypointError::MalformedCredential(format!(
                "expected 3 token segments, found {}",
                segments.len()
            )));
        }

        let payload = segments[1].trim_end_matches('=');
        let decoded = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| WaypointError::MalformedCredential(format!("invalid base64 payload: {}", e)))?;

        let claims: Map<String, Value> = serde_json::from_slice(&decoded)
            .map_err(|e| WaypointError::MalformedCredential(format!("invalid claims JSON: {}", e)))?;

        Ok(Self { claims })
    }

    /// The `sub` claim, used as the owner key for trip lookups.
    ///
    /// Absence is not enforced here; callers decide how to treat a credential
    /// without a subject.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    /// Look up an arbitrary claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}
