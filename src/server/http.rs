//! HTTP server implementation
//!
//! hyper http1 accept loop with TokioIo for async handling, routing incoming
//! requests by method and path.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::db::{ExperienceStore, MongoClient, TripStore};
use crate::response;
use crate::routes;
use crate::types::Result;

/// Shared application state
///
/// Store collaborators are injected as trait objects; each request reads
/// through them without any shared mutable state, so requests are fully
/// independent.
pub struct AppState {
    pub args: Args,
    /// Trip point-read store
    pub trip_store: Arc<dyn TripStore>,
    /// Experience secondary-index store
    pub experience_store: Arc<dyn ExperienceStore>,
    /// Backing MongoDB client, kept for readiness probing; None on in-memory
    /// fallback
    pub mongo: Option<MongoClient>,
}

impl AppState {
    pub fn new(
        args: Args,
        trip_store: Arc<dyn TripStore>,
        experience_store: Arc<dyn ExperienceStore>,
        mongo: Option<MongoClient>,
    ) -> Self {
        Self {
            args,
            trip_store,
            experience_store,
            mongo,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Waypoint listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    if state.args.dev_mode {
        warn!("Development mode enabled");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { Ok::<_, Infallible>(handle_request(state, req).await) }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(state: Arc<AppState>, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("{} {}", method, path);

    match (method, path.as_str()) {
        // Liveness probe - returns 200 if waypoint is running
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state)).await
        }

        // Readiness probe - returns 200 only if the store is reachable
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            routes::readiness_check(Arc::clone(&state)).await
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => response::preflight(),

        // Trip aggregation endpoint
        (Method::GET, p) if p.starts_with("/api/v1/trips/") => {
            let trip_id = p.strip_prefix("/api/v1/trips/").unwrap_or("");
            if trip_id.is_empty() || trip_id.contains('/') {
                return not_found_response(p);
            }

            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string());

            routes::handle_get_trip(state, auth_header.as_deref(), trip_id).await
        }

        // Not found
        _ => not_found_response(&path),
    }
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
        "hint": "Use GET /api/v1/trips/{trip_id}"
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}
