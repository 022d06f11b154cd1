//! Open Charge Map directory adapter.
//!
//! OCM is a best-effort supplemental source: any failure here degrades to
//! an empty candidate list and must never fail the overall request.

mod client;
mod convert;
mod error;
mod types;

pub use client::{OcmClient, OcmConfig};
pub use convert::convert_poi;
pub use error::OcmError;
pub use types::{AddressInfo, Connection, ConnectionType, Poi};
