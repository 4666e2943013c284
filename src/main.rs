//! Waypoint - authenticated read gateway for aggregated trip documents

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waypoint::{
    config::Args,
    db::{
        ExperienceStore, MemoryExperienceStore, MemoryTripStore, MongoClient,
        MongoExperienceStore, MongoTripStore, TripStore,
    },
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("waypoint={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Waypoint - Trip Aggregation Gateway");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("MongoDB: {}", args.mongodb_uri);
    info!("Trips collection: {}", args.trips_collection);
    info!("Experiences collection: {}", args.experiences_collection);
    info!("======================================");

    // Connect to MongoDB (optional in dev mode)
    let (trip_store, experience_store, mongo): (
        Arc<dyn TripStore>,
        Arc<dyn ExperienceStore>,
        Option<MongoClient>,
    ) = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => {
            info!("MongoDB connected successfully");
            let trips = MongoTripStore::new(&client, &args.trips_collection).await?;
            let experiences =
                MongoExperienceStore::new(&client, &args.experiences_collection).await?;
            (Arc::new(trips), Arc::new(experiences), Some(client))
        }
        Err(e) => {
            if args.dev_mode {
                warn!(
                    "MongoDB connection failed (dev mode, continuing with in-memory stores): {}",
                    e
                );
                (
                    Arc::new(MemoryTripStore::new()),
                    Arc::new(MemoryExperienceStore::new()),
                    None,
                )
            } else {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Create application state
    let state = Arc::new(server::AppState::new(
        args,
        trip_store,
        experience_store,
        mongo,
    ));

    // Run the server
    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
