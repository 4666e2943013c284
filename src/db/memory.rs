//! In-memory store implementations
//!
//! Used by tests and by dev mode when MongoDB is unreachable. Contents are
//! fixed at construction; the read path never mutates them, so no locking is
//! needed.

use async_trait::async_trait;
use serde_json::Value;

use crate::db::schemas::{TripDoc, VERIFIED_STATUS};
use crate::db::stores::{ExperienceStore, TripStore};
use crate::types::Result;

/// In-memory trip store
#[derive(Default)]
pub struct MemoryTripStore {
    trips: Vec<TripDoc>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(trips: Vec<TripDoc>) -> Self {
        Self { trips }
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn get_trip(&self, owner_id: &str, trip_id: &str) -> Result<Option<TripDoc>> {
        Ok(self
            .trips
            .iter()
            .find(|t| t.owner_id == owner_id && t.id == trip_id)
            .cloned())
    }
}

/// In-memory experience store
///
/// Holds raw JSON documents carrying at least `id` and `status` fields,
/// matching what the Mongo store would return.
#[derive(Default)]
pub struct MemoryExperienceStore {
    experiences: Vec<Value>,
}

impl MemoryExperienceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_experiences(experiences: Vec<Value>) -> Self {
        Self { experiences }
    }
}

#[async_trait]
impl ExperienceStore for MemoryExperienceStore {
    async fn query_verified(&self, experience_id: &str) -> Result<Vec<Value>> {
        Ok(self
            .experiences
            .iter()
            .filter(|e| {
                e.get("status").and_then(Value::as_str) == Some(VERIFIED_STATUS)
                    && e.get("id").and_then(Value::as_str) == Some(experience_id)
            })
            .cloned()
            .collect())
    }
}
