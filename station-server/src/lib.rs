//! EV charging station lookup server.
//!
//! Answers: "where can I charge near here?" by merging the warehouse
//! station inventory with the public Open Charge Map directory.

pub mod domain;
pub mod geo;
pub mod ocm;
pub mod resolver;
pub mod store;
pub mod web;
