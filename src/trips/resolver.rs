//! Ownership-scoped trip resolution

use crate::db::schemas::TripDoc;
use crate::db::stores::TripStore;
use crate::types::{Result, WaypointError};

/// Resolve one trip by exact (owner_id, trip_id) key.
///
/// Absence maps to [`WaypointError::TripNotFound`]; a store failure is
/// terminal for the request, with no retry.
pub async fn resolve(store: &dyn TripStore, owner_id: &str, trip_id: &str) -> Result<TripDoc> {
    match store.get_trip(owner_id, trip_id).await? {
        Some(trip) => Ok(trip),
        None => Err(WaypointError::TripNotFound),
    }
}
