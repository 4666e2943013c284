//! Response envelope builder
//!
//! Every exit path of the trip endpoint goes through this module: a status
//! code plus a JSON payload, wrapped with the gateway's permissive CORS
//! headers and numerically-safe serialization.
//!
//! Numeric safety: store-level decimal fields must not widen into floats when
//! they carry no fractional part. `5.0` serializes as `5`, `5.5` stays `5.5`.
//! BSON `Decimal128` values survive document-to-JSON conversion as
//! `{"$numberDecimal": "..."}` wrappers and are collapsed by the same rule.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::{Number, Value};

use crate::types::{Result, WaypointError};

/// Methods advertised on every response
pub const ALLOW_METHODS: &str = "OPTIONS, POST, GET";

/// Headers advertised on every response
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Build a response envelope from a status code and a serializable payload.
///
/// Serialization failure is the only failure mode and is fatal for the
/// request; callers propagate it to the service boundary.
pub fn build<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response<Full<Bytes>>> {
    let value = normalize_numbers(serde_json::to_value(payload)?);
    let body = serde_json::to_vec(&value)?;

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| WaypointError::Config(format!("response build failed: {}", e)))
}

/// Build the `{"error": ...}` envelope for a request-terminal error
pub fn error(err: &WaypointError) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": err.to_string() });

    build(err.status_code(), &body).unwrap_or_else(|_| {
        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(r#"{"error":"Internal error"}"#)))
            .unwrap()
    })
}

/// CORS preflight response with the envelope's standard headers
pub fn preflight() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Collapse whole-valued floats to integers, recursively.
///
/// Also collapses single-key `{"$numberDecimal": "..."}` objects produced by
/// BSON Decimal128 conversion: no fractional part yields an integer,
/// otherwise a float.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(normalize_number(n)),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(repr)) = map.get("$numberDecimal") {
                    if let Some(n) = decimal_to_number(repr) {
                        return Value::Number(n);
                    }
                }
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, normalize_numbers(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        other => other,
    }
}

fn normalize_number(n: Number) -> Number {
    if let Some(f) = n.as_f64() {
        // Integers and non-finite values pass through untouched
        if n.is_f64() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            return Number::from(f as i64);
        }
    }
    n
}

fn decimal_to_number(repr: &str) -> Option<Number> {
    let parsed: f64 = repr.trim().parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    if parsed.fract() == 0.0 && parsed >= i64::MIN as f64 && parsed <= i64::MAX as f64 {
        Some(Number::from(parsed as i64))
    } else {
        Number::from_f64(parsed)
    }
}
