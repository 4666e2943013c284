//! HTTP route handlers

pub mod health;
pub mod trips;

pub use health::{health_check, readiness_check, version_info};
pub use trips::handle_get_trip;
