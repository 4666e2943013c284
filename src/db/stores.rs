//! Store collaborators for the trip aggregation path
//!
//! The core resolves trips and experiences through these traits, never
//! through concrete clients, so in-memory fakes can stand in for MongoDB in
//! tests and dev mode. Lifecycle of the backing connections is owned by the
//! surrounding process.

use async_trait::async_trait;
use bson::doc;
use serde_json::Value;

use crate::db::mongo::{MongoClient, MongoCollection};
use crate::db::schemas::{ExperienceDoc, TripDoc, VERIFIED_STATUS};
use crate::types::{Result, WaypointError};

/// Point reads of trips keyed by (owner_id, trip_id)
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Exact-key read. `Ok(None)` means no trip exists for the pair; store
    /// failures are terminal for the request.
    async fn get_trip(&self, owner_id: &str, trip_id: &str) -> Result<Option<TripDoc>>;
}

/// Secondary-index reads of experiences by (status = VERIFIED, id)
#[async_trait]
pub trait ExperienceStore: Send + Sync {
    /// All VERIFIED records for the given id, in store order. The index is
    /// expected to hold at most one; callers apply first-wins if it does not.
    async fn query_verified(&self, experience_id: &str) -> Result<Vec<Value>>;
}

/// MongoDB-backed trip store
#[derive(Clone)]
pub struct MongoTripStore {
    collection: MongoCollection<TripDoc>,
}

impl MongoTripStore {
    /// Open the trips collection and apply its indexes
    pub async fn new(client: &MongoClient, collection_name: &str) -> Result<Self> {
        Ok(Self {
            collection: client.collection(collection_name).await?,
        })
    }
}

#[async_trait]
impl TripStore for MongoTripStore {
    async fn get_trip(&self, owner_id: &str, trip_id: &str) -> Result<Option<TripDoc>> {
        self.collection
            .find_one(doc! { "owner_id": owner_id, "id": trip_id })
            .await
            .map_err(|e| WaypointError::StoreUnavailable(format!("Failed to get trip: {}", e)))
    }
}

/// MongoDB-backed experience store
#[derive(Clone)]
pub struct MongoExperienceStore {
    collection: MongoCollection<ExperienceDoc>,
}

impl MongoExperienceStore {
    /// Open the experiences collection and apply its (status, id) index
    pub async fn new(client: &MongoClient, collection_name: &str) -> Result<Self> {
        Ok(Self {
            collection: client.collection(collection_name).await?,
        })
    }
}

#[async_trait]
impl ExperienceStore for MongoExperienceStore {
    async fn query_verified(&self, experience_id: &str) -> Result<Vec<Value>> {
        let docs = self
            .collection
            .find_many(doc! { "status": VERIFIED_STATUS, "id": experience_id })
            .await
            .map_err(|e| {
                WaypointError::StoreUnavailable(format!("Failed to get trip experience: {}", e))
            })?;

        docs.into_iter().map(ExperienceDoc::into_value).collect()
    }
}
