//! Trip document schema
//!
//! A trip is owned by exactly one subject and is addressable only through the
//! (owner_id, id) pair; no lookup path exists that does not pin owner_id to
//! the authenticated subject.

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::db::mongo::IntoIndexes;

/// Default collection name for trips
pub const TRIPS_COLLECTION: &str = "trips";

/// Trip document stored in MongoDB
///
/// All descriptive fields are required; a stored trip missing one of them
/// fails deserialization rather than surfacing nulls downstream.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TripDoc {
    /// Owning subject (partition key)
    pub owner_id: String,

    /// Trip identifier (range key within the owner)
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Start date as a date/time string
    pub start_date: String,

    /// End date as a date/time string
    pub end_date: String,

    /// Referenced experience ids
    ///
    /// Set semantics by construction: no duplicates, and iteration is ordered
    /// by id, which keeps the aggregated output deterministic.
    #[serde(default)]
    pub experience_refs: BTreeSet<String>,
}

impl IntoIndexes for TripDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Composite primary addressing: one trip per (owner_id, id)
            (
                doc! { "owner_id": 1, "id": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("owner_trip_unique".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_refs_default_to_empty() {
        let trip: TripDoc = serde_json::from_value(serde_json::json!({
            "owner_id": "u1",
            "id": "t1",
            "name": "Coast drive",
            "description": "Down the coast",
            "start_date": "2024-05-01",
            "end_date": "2024-05-08",
        }))
        .unwrap();
        assert!(trip.experience_refs.is_empty());
    }

    #[test]
    fn test_refs_deduplicate_and_sort() {
        let trip: TripDoc = serde_json::from_value(serde_json::json!({
            "owner_id": "u1",
            "id": "t1",
            "name": "n",
            "description": "d",
            "start_date": "s",
            "end_date": "e",
            "experience_refs": ["exp-b", "exp-a", "exp-b"],
        }))
        .unwrap();
        let refs: Vec<&String> = trip.experience_refs.iter().collect();
        assert_eq!(refs, ["exp-a", "exp-b"]);
    }

    #[test]
    fn test_missing_required_field_fails_fast() {
        let result: Result<TripDoc, _> = serde_json::from_value(serde_json::json!({
            "owner_id": "u1",
            "id": "t1",
            "name": "n",
        }));
        assert!(result.is_err());
    }
}
