//! Waypoint - authenticated read gateway for aggregated trip documents
//!
//! Waypoint serves a single aggregation endpoint: `GET /api/v1/trips/{trip_id}`.
//! It identifies the caller from a bearer credential (structurally decoded,
//! signature deliberately unverified), resolves the trip scoped to that
//! owner, joins the full details of every VERIFIED experience the trip
//! references, and returns the assembled JSON document.
//!
//! ## Modules
//!
//! - **auth**: bearer header parsing and unverified claim extraction
//! - **trips**: the aggregation core (resolver, joiner, aggregator)
//! - **db**: MongoDB stores behind injectable traits, plus in-memory fakes
//! - **response**: response envelope with CORS headers and numeric-safe JSON
//! - **server**: hyper http1 accept loop and routing

pub mod auth;
pub mod config;
pub mod db;
pub mod response;
pub mod routes;
pub mod server;
pub mod trips;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, WaypointError};
