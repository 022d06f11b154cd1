//! Nearby-station resolver.
//!
//! Merges the authoritative warehouse inventory with the best-effort OCM
//! directory, ranks by great-circle distance, and truncates to the
//! requested limit.

mod config;
mod search;

pub use config::ResolverConfig;
pub use search::{merge_and_rank, NearbyRequest, ResolveError, Resolver};
