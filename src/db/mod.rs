//! Storage layer for Waypoint
//!
//! MongoDB-backed stores behind injectable traits, plus in-memory fakes for
//! dev mode and tests.

pub mod memory;
pub mod mongo;
pub mod schemas;
pub mod stores;

pub use memory::{MemoryExperienceStore, MemoryTripStore};
pub use mongo::{IntoIndexes, MongoClient, MongoCollection};
pub use stores::{ExperienceStore, MongoExperienceStore, MongoTripStore, TripStore};
