//! HTTP server for Waypoint

pub mod http;

pub use http::{run, AppState};
