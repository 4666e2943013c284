//! Configuration for Waypoint
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Waypoint - authenticated read gateway for aggregated trip documents
#[derive(Parser, Debug, Clone)]
#[command(name = "waypoint")]
#[command(about = "Authenticated read gateway serving aggregated trip documents")]
pub struct Args {
    /// Unique node identifier for this gateway instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "waypoint")]
    pub mongodb_db: String,

    /// Collection holding trip records
    #[arg(long, env = "TRIPS_COLLECTION", default_value = "trips")]
    pub trips_collection: String,

    /// Collection holding experience records
    #[arg(long, env = "EXPERIENCES_COLLECTION", default_value = "experiences")]
    pub experiences_collection: String,

    /// Enable development mode (falls back to in-memory stores when MongoDB
    /// is unreachable)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.trips_collection.is_empty() {
            return Err("TRIPS_COLLECTION must not be empty".to_string());
        }

        if self.experiences_collection.is_empty() {
            return Err("EXPERIENCES_COLLECTION must not be empty".to_string());
        }

        if self.trips_collection == self.experiences_collection {
            return Err("TRIPS_COLLECTION and EXPERIENCES_COLLECTION must differ".to_string());
        }

        Ok(())
    }
}
