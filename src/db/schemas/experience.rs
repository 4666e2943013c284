//! Experience document schema
//!
//! Experiences are independently owned entities. Through the trip join path
//! they are never addressed by id alone: resolution goes through the
//! (status, id) secondary index, so a non-VERIFIED experience is simply
//! unreachable from a trip.

use bson::{doc, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::mongo::IntoIndexes;
use crate::types::{Result, WaypointError};

/// Default collection name for experiences
pub const EXPERIENCES_COLLECTION: &str = "experiences";

/// The only status honored by the trip join path
pub const VERIFIED_STATUS: &str = "VERIFIED";

/// Experience document stored in MongoDB
///
/// Only `id` and `status` are schema-level fields (they form the secondary
/// index); everything else is application-defined and passed through
/// untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExperienceDoc {
    /// Stable experience identifier
    pub id: String,

    /// Verification status; only [`VERIFIED_STATUS`] is served
    pub status: String,

    /// Remaining application-defined fields, passed through verbatim
    #[serde(flatten)]
    pub detail: Document,
}

impl ExperienceDoc {
    /// Convert to a transport-neutral JSON value for aggregation
    pub fn into_value(self) -> Result<Value> {
        serde_json::to_value(self).map_err(WaypointError::from)
    }
}

impl IntoIndexes for ExperienceDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Secondary index used by the trip join path
            (
                doc! { "status": 1, "id": 1 },
                Some(IndexOptions::builder().name("by_status".to_string()).build()),
            ),
        ]
    }
}
