//! Database schemas for Waypoint
//!
//! Defines the trip and experience document structures and their index
//! declarations.

mod experience;
mod trip;

pub use experience::{ExperienceDoc, EXPERIENCES_COLLECTION, VERIFIED_STATUS};
pub use trip::{TripDoc, TRIPS_COLLECTION};
