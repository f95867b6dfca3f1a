//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

use nation_core::{Address, Chain};
use venation::LockSnapshot;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub chain: Chain,
}

impl HealthResponse {
    pub fn new(chain: Chain) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            chain,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// A lock duration preset for the date slider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationPresetDto {
    pub label: String,
    pub days: u64,
    pub years: u32,
}

/// veNATION parameters the lock page needs before any wallet is connected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeNationConfigResponse {
    pub chain: Chain,
    pub chain_id: u64,
    pub nation_token: Address,
    pub venation_token: Address,
    pub passport_required_balance: f64,
    pub rewards_multiplier: f64,
    pub min_lock_days: u64,
    pub max_lock_years: u32,
    pub min_increase_days: u64,
    pub duration_presets: Vec<DurationPresetDto>,
}

/// Request to plan the contract calls for the lock form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockActionRequestDto {
    /// Current lock record, if the wallet has one
    pub lock: Option<LockSnapshot>,
    /// Final total amount to lock (decimal string)
    #[serde(default)]
    pub lock_amount: String,
    /// Unlock date (`YYYY-MM-DD`); empty keeps the current expiration
    #[serde(default)]
    pub lock_date: String,
}
