//! Trip aggregation endpoint
//!
//! `GET /api/v1/trips/{trip_id}`
//!
//! Authenticates the caller from the bearer credential (structurally, without
//! signature verification — see [`crate::auth::claims`]), resolves the trip
//! scoped to the claimed subject, joins the referenced VERIFIED experiences,
//! and returns the aggregated document. Every exit path goes through the
//! response envelope builder.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::auth;
use crate::response;
use crate::server::AppState;
use crate::trips;
use crate::types::{Result, WaypointError};

/// Handle `GET /api/v1/trips/{trip_id}`
pub async fn handle_get_trip(
    state: Arc<AppState>,
    auth_header: Option<&str>,
    trip_id: &str,
) -> Response<Full<Bytes>> {
    match get_trip(state, auth_header, trip_id).await {
        Ok(resp) => resp,
        Err(err) => {
            match err.status_code() {
                StatusCode::INTERNAL_SERVER_ERROR => {
                    error!(trip_id = %trip_id, error = %err, "Trip aggregation failed")
                }
                StatusCode::NOT_FOUND => {
                    debug!(trip_id = %trip_id, "Trip not found")
                }
                _ => debug!(trip_id = %trip_id, error = %err, "Request rejected"),
            }
            response::error(&err)
        }
    }
}

async fn get_trip(
    state: Arc<AppState>,
    auth_header: Option<&str>,
    trip_id: &str,
) -> Result<Response<Full<Bytes>>> {
    let claims = auth::authenticate(auth_header)?;
    let subject = claims
        .subject()
        .ok_or_else(|| WaypointError::MalformedCredential("missing sub claim".into()))?;

    let trip = trips::resolve(state.trip_store.as_ref(), subject, trip_id).await?;

    let referenced = trip.experience_refs.len();
    let experiences =
        trips::resolve_all(state.experience_store.as_ref(), &trip.experience_refs).await?;

    info!(
        trip_id = %trip_id,
        referenced,
        resolved = experiences.len(),
        "Trip aggregated"
    );

    let view = trips::assemble(trip, experiences);
    response::build(StatusCode::OK, &view)
}
