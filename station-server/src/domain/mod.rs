//! Core domain types for the station lookup service.

mod candidate;
mod station;

pub use candidate::{Source, StationCandidate};
pub use station::Station;
