//! Nation-api: HTTP API layer for the Nation3 lock page
//!
//! Exposes the veNATION calculator to the web frontend. The frontend fetches
//! balances and lock records from chain and posts them here as snapshots.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{ApiError, AppState};
