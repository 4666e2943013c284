//! Final document assembly

use serde::Serialize;
use serde_json::Value;

use crate::db::schemas::TripDoc;

/// Aggregated trip document returned to the caller
///
/// A pure projection of the trip record with the resolved experience details
/// substituted for the raw reference set.
#[derive(Debug, Serialize)]
pub struct TripView {
    pub owner_id: String,
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub experiences: Vec<Value>,
}

/// Assemble the response document from a trip and its resolved experiences
pub fn assemble(trip: TripDoc, experiences: Vec<Value>) -> TripView {
    TripView {
        owner_id: trip.owner_id,
        id: trip.id,
        name: trip.name,
        start_date: trip.start_date,
        end_date: trip.end_date,
        description: trip.description,
        experiences,
    }
}
