//! Error types for Nation3

use thiserror::Error;

/// Core errors that can occur in Nation3
#[derive(Debug, Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Protocol-specific errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Protocol not available on {network}")]
    NetworkNotSupported { network: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Invalid lock window: min {min} is after max {max}")]
    InvalidWindow { min: String, max: String },

    #[error("Date {date} is outside the lock window ({min} to {max})")]
    DateOutOfRange {
        date: String,
        min: String,
        max: String,
    },

    #[error("Protocol state unavailable: {reason}")]
    StateUnavailable { reason: String },
}

/// Fixed-point amount parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount '{input}'")]
    Malformed { input: String },

    #[error("Too many decimal places: {places} (max {max})")]
    TooManyDecimals { places: usize, max: u8 },

    #[error("Amount overflows 128-bit base units")]
    Overflow,
}

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NetworkNotSupported { .. } => "network_not_supported",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::InvalidWindow { .. } => "invalid_window",
            Self::DateOutOfRange { .. } => "date_out_of_range",
            Self::StateUnavailable { .. } => "state_unavailable",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAddress { .. } => 400,
            Self::InvalidWindow { .. } | Self::DateOutOfRange { .. } => 422,
            Self::NetworkNotSupported { .. } => 422,
            Self::StateUnavailable { .. } => 503,
        }
    }
}
