use std::net::SocketAddr;

use station_server::ocm::{OcmClient, OcmConfig};
use station_server::resolver::ResolverConfig;
use station_server::store::{SnowflakeConfig, SnowflakeStore};
use station_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Warehouse credentials from environment
    let account = std::env::var("SNOWFLAKE_ACCOUNT").unwrap_or_else(|_| {
        eprintln!("Warning: SNOWFLAKE_ACCOUNT not set. Store queries will fail.");
        String::new()
    });
    let token = std::env::var("SNOWFLAKE_TOKEN").unwrap_or_else(|_| {
        eprintln!("Warning: SNOWFLAKE_TOKEN not set. Store queries will fail.");
        String::new()
    });
    let warehouse = std::env::var("SNOWFLAKE_WAREHOUSE").unwrap_or_default();
    let database = std::env::var("SNOWFLAKE_DATABASE").unwrap_or_default();
    let schema = std::env::var("SNOWFLAKE_SCHEMA").unwrap_or_default();

    // Directory key is optional: without it, nearby results come from the
    // warehouse only
    let ocm_key = std::env::var("OCM_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: OCM_API_KEY not set. Directory results disabled.");
        String::new()
    });

    let store_config =
        SnowflakeConfig::new(&account, &token).with_context(warehouse, database, schema);
    let store = SnowflakeStore::new(store_config).expect("Failed to create Snowflake store");

    let directory = OcmClient::new(OcmConfig::new(&ocm_key)).expect("Failed to create OCM client");

    let state = AppState::new(store, directory, ResolverConfig::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("EV Station Server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health           - Health check");
    println!("  GET  /stations         - List stations");
    println!("  GET  /stations/nearby  - Nearest stations to a point");
    println!("  GET  /stations/count   - Station count");
    println!("  GET  /stations/search  - Search stations by name/location");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
