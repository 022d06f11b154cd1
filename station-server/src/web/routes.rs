//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, warn};

use crate::domain::{Station, StationCandidate};
use crate::resolver::{NearbyRequest, ResolveError};
use crate::store::{StationStore, StoreError};

use super::dto::*;
use super::state::AppState;

/// Default search radius in km.
const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Default number of nearby stations to return.
const DEFAULT_NEARBY_LIMIT: usize = 5;

/// Default cap for the station list endpoint.
const DEFAULT_LIST_LIMIT: usize = 1000;

/// Default cap for the station search endpoint.
const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Create the application router.
pub fn create_router<S: StationStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/nearby", get(nearby_stations))
        .route("/stations/count", get(station_count))
        .route("/stations/search", get(search_stations))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations from the warehouse.
async fn list_stations<S: StationStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<ListQuery>,
) -> Result<Json<Vec<Station>>, AppError> {
    let limit = req.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let stations = state.store.list(limit).await?;
    Ok(Json(stations))
}

/// Nearby stations with distance and travel-time estimates.
async fn nearby_stations<S: StationStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<NearbyQuery>,
) -> Result<Json<Vec<StationCandidate>>, AppError> {
    let request = NearbyRequest {
        lat: req.lat,
        lon: req.lon,
        radius_km: req.radius.unwrap_or(DEFAULT_RADIUS_KM),
        include_directory: req.use_directory.unwrap_or(true),
        limit: req.limit.unwrap_or(DEFAULT_NEARBY_LIMIT),
    };

    let candidates = state.resolver.nearby_stations(&request).await?;
    Ok(Json(candidates))
}

/// Total station count in the warehouse.
async fn station_count<S: StationStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.store.count().await?;
    Ok(Json(CountResponse {
        count,
        source: "snowflake",
    }))
}

/// Search stations by name or location.
async fn search_stations<S: StationStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<SearchQuery>,
) -> Result<Json<Vec<Station>>, AppError> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let stations = state.store.search(&req.query, limit).await?;
    Ok(Json(stations))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidRequest(message) => AppError::BadRequest { message },
            ResolveError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        // The store is authoritative: any failure is service-unavailable,
        // never an empty result set.
        AppError::ServiceUnavailable {
            message: format!("station store unavailable: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::ServiceUnavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!("[{status}] {message}");
        } else {
            warn!("[{status}] {message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
