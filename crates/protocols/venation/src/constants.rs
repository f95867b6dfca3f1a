//! veNATION escrow parameters

use crate::dates::DateOffset;

/// Shortest lock the escrow accepts
pub const MIN_LOCK_DAYS: u64 = 7;

/// Longest lock the escrow accepts
pub const MAX_LOCK_YEARS: u32 = 4;

/// An unlock date must move at least this far past the current expiration
/// to count as a time increase
pub const MIN_INCREASE_DAYS: u64 = 7;

/// Mean tropical year (365.2422 days) in seconds
pub const SECONDS_PER_YEAR_APPROX: i64 = 31_556_926;

/// Four approximate years, the full decay span of a maximum lock.
/// Only the vesting estimate uses this; lock windows use calendar years.
pub const FOUR_YEARS_SECS: i64 = SECONDS_PER_YEAR_APPROX * MAX_LOCK_YEARS as i64;

/// Minimum lock offset from now
pub const MIN_LOCK_OFFSET: DateOffset = DateOffset {
    days: MIN_LOCK_DAYS,
    years: 0,
};

/// Maximum lock offset from now
pub const MAX_LOCK_OFFSET: DateOffset = DateOffset {
    days: 0,
    years: MAX_LOCK_YEARS,
};

/// Duration presets offered by the date slider: (label, offset from now)
pub const LOCK_DURATION_PRESETS: &[(&str, DateOffset)] = &[
    ("1 Week", MIN_LOCK_OFFSET),
    ("1 Year", DateOffset { days: 0, years: 1 }),
    ("2 Years", DateOffset { days: 0, years: 2 }),
    ("4 Years", MAX_LOCK_OFFSET),
];

/// Estimates above this many tokens show 2 decimals, smaller ones 8
pub const ESTIMATE_COARSE_THRESHOLD: f64 = 1.0;

/// veNATION balances above one token show 2 decimals, smaller ones 6
pub const VENATION_DISPLAY_PLACES_LARGE: u8 = 2;
pub const VENATION_DISPLAY_PLACES_SMALL: u8 = 6;

/// Locked NATION always shows 2 decimals
pub const LOCKED_DISPLAY_PLACES: u8 = 2;

/// Headroom suggested on top of the passport threshold, since veNATION decays
pub const PASSPORT_BALANCE_BUFFER: f64 = 0.5;

/// Label of the approval button shown before a lock can be submitted
pub const APPROVE_TEXT: &str = "Approve $NATION";

pub const DATE_HINT_NEW_LOCK: &str = "Minimum one week, maximum four years from now.";
pub const DATE_HINT_EXISTING_LOCK: &str = "Maximum four years from now.";
