//! Health check endpoints
//!
//! Kubernetes-style probes:
//! - /health, /healthz - Liveness probe (is the service running?)
//! - /ready, /readyz - Readiness probe (is the store reachable?)
//!
//! Liveness always returns 200 while the process runs. Readiness requires the
//! MongoDB backend to answer a ping, unless the instance runs on in-memory
//! stores (dev mode fallback), which are always ready.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::server::AppState;

/// Health/readiness response body
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if service is running)
    pub healthy: bool,
    /// Service version
    pub version: &'static str,
    /// Current timestamp
    pub timestamp: String,
    /// Operating mode
    pub mode: String,
    /// Node identifier
    pub node_id: String,
    /// Store backend status
    pub store: StoreHealth,
    /// Error message if the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Store backend details
#[derive(Serialize)]
pub struct StoreHealth {
    /// "mongodb" or "memory"
    pub backend: &'static str,
    /// Whether the backend answered the last probe
    pub connected: bool,
}

async fn build_health_response(state: &AppState) -> HealthResponse {
    let (backend, connected, error) = match &state.mongo {
        Some(mongo) => match mongo.ping().await {
            Ok(()) => ("mongodb", true, None),
            Err(e) => ("mongodb", false, Some(e.to_string())),
        },
        // In-memory stores have nothing to probe
        None => ("memory", true, None),
    };

    HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: if state.args.dev_mode {
            "development".to_string()
        } else {
            "production".to_string()
        },
        node_id: state.args.node_id.to_string(),
        store: StoreHealth { backend, connected },
        error,
    }
}

fn json_body(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Handle liveness probe (/health, /healthz)
///
/// Always 200 while the service runs; the body carries store status for
/// informational purposes.
pub async fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = build_health_response(&state).await;

    let body = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"healthy":true,"error":"Serialization failed"}"#.to_string());

    json_body(StatusCode::OK, body)
}

/// Handle readiness probe (/ready, /readyz)
///
/// 200 only when the store backend can serve traffic. Use for load balancer
/// health checks.
pub async fn readiness_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = build_health_response(&state).await;

    let status = if response.store.connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"healthy":false,"error":"Serialization failed"}"#.to_string());

    json_body(status, body)
}

/// Version information for deployment verification
#[derive(Serialize)]
pub struct VersionResponse {
    /// Cargo package version
    pub version: &'static str,
    /// Git commit hash (short)
    pub commit: &'static str,
    /// Git commit hash (full)
    pub commit_full: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Handle version endpoint (/version)
pub fn version_info() -> Response<Full<Bytes>> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        commit_full: option_env!("GIT_COMMIT_FULL").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "waypoint",
    };

    let body = serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"version":"unknown","commit":"unknown"}"#.to_string());

    json_body(StatusCode::OK, body)
}
