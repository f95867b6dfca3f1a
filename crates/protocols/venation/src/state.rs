//! veNATION lock state types
//!
//! Chain snapshots as handed over by the data-fetching layer, the derived
//! lock state, and errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nation_core::{wei_string, AmountError, ProtocolError, UnixSeconds, Wei};

use crate::dates::to_readable;

/// An escrow position as stored by the veNATION contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRecord {
    /// NATION locked, in base units
    #[serde(with = "wei_string")]
    pub locked_amount: Wei,
    /// Expiration (unix seconds)
    pub lock_end: UnixSeconds,
}

/// Lock record fetch result, possibly still in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockSnapshot {
    #[serde(with = "wei_string", default)]
    pub locked_amount: Wei,
    #[serde(default)]
    pub lock_end: UnixSeconds,
    #[serde(default)]
    pub loading: bool,
}

impl LockSnapshot {
    /// The record, unless the fetch is still loading
    pub fn record(&self) -> Option<LockRecord> {
        if self.loading {
            return None;
        }
        Some(LockRecord {
            locked_amount: self.locked_amount,
            lock_end: self.lock_end,
        })
    }
}

/// Token balance fetch result, possibly still in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    /// Decimal string as formatted by the wallet library
    #[serde(default)]
    pub formatted: String,
    #[serde(with = "wei_string", default)]
    pub value: Wei,
    #[serde(default)]
    pub loading: bool,
}

impl BalanceSnapshot {
    pub fn value(&self) -> Option<Wei> {
        (!self.loading).then_some(self.value)
    }
}

/// Derived status of the user's escrow position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LockState {
    /// Nothing locked (or not known yet)
    NoLock,
    /// Locked and not yet expired
    Active(LockRecord),
    /// Locked but past its expiration; only withdrawal is possible
    Expired(LockRecord),
}

impl LockState {
    pub fn has_lock(&self) -> bool {
        !matches!(self, Self::NoLock)
    }

    pub fn has_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }

    pub fn record(&self) -> Option<&LockRecord> {
        match self {
            Self::NoLock => None,
            Self::Active(record) | Self::Expired(record) => Some(record),
        }
    }

    pub fn locked_amount(&self) -> Wei {
        self.record().map_or(0, |r| r.locked_amount)
    }
}

/// Legal range for a new lock expiration date.
///
/// Always satisfies `min <= max`; construct through [`TimeWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> Result<Self, ProtocolError> {
        if min > max {
            return Err(ProtocolError::InvalidWindow {
                min: to_readable(min),
                max: to_readable(max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> DateTime<Utc> {
        self.min
    }

    pub fn max(&self) -> DateTime<Utc> {
        self.max
    }

    /// Day-granular containment check, as the date picker sees it
    pub fn contains_day(&self, date: DateTime<Utc>) -> bool {
        let day = date.date_naive();
        day >= self.min.date_naive() && day <= self.max.date_naive()
    }
}

/// Which parts of an existing lock the proposed values would increase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreaseCapability {
    pub amount: bool,
    pub time: bool,
}

impl IncreaseCapability {
    pub fn any(&self) -> bool {
        self.amount || self.time
    }
}

/// Projected veNATION balance for values not yet committed on chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingEstimate {
    pub value: f64,
    /// Rounded for display: 2 decimals above one token, 8 below
    pub display: String,
}

impl VestingEstimate {
    pub fn zero() -> Self {
        Self {
            value: 0.0,
            display: "0".to_string(),
        }
    }
}

/// veNATION protocol errors
#[derive(Debug, Error)]
pub enum VeNationError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Date {date} is before the earliest allowed date {min}")]
    DateBeforeMinimum { date: String, min: String },

    #[error("Date {date} is after the latest allowed date {max}")]
    DateAfterMaximum { date: String, max: String },

    #[error("Lock amount must be greater than zero")]
    ZeroAmount,

    #[error("Proposed lock increases neither amount nor time")]
    NothingToIncrease,

    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("{0}")]
    Protocol(#[from] ProtocolError),
}

impl VeNationError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "invalid_date",
            Self::DateBeforeMinimum { .. } | Self::DateAfterMaximum { .. } => {
                "date_out_of_range"
            }
            Self::ZeroAmount | Self::Amount(_) => "invalid_amount",
            Self::NothingToIncrease => "nothing_to_increase",
            Self::Protocol(e) => e.error_code(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDate { .. } | Self::ZeroAmount | Self::Amount(_) => 400,
            Self::DateBeforeMinimum { .. } | Self::DateAfterMaximum { .. } => 422,
            Self::NothingToIncrease => 422,
            Self::Protocol(e) => e.status_code(),
        }
    }
}
