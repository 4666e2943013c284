//! Trip aggregation core
//!
//! The pipeline behind `GET /api/v1/trips/{trip_id}`:
//! resolve the trip for the authenticated owner, join the full details of
//! every referenced experience, assemble the response document.

pub mod aggregate;
pub mod joiner;
pub mod resolver;

pub use aggregate::{assemble, TripView};
pub use joiner::resolve_all;
pub use resolver::resolve;
