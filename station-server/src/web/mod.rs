//! Web layer for the station lookup service.
//!
//! Provides JSON HTTP endpoints over the station store and the nearby
//! resolver.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
