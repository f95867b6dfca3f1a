//! Calendar helpers for lock dates
//!
//! Lock dates are picked per day in the UI (`YYYY-MM-DD`). Offsets shift the
//! calendar fields rather than adding fixed seconds, so "four years from now"
//! lands on the same month and day regardless of leap years.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use nation_core::UnixSeconds;

use crate::state::{TimeWindow, VeNationError};

const READABLE_FORMAT: &str = "%Y-%m-%d";

/// A calendar offset: `days` shifts the day field, `years` the year field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOffset {
    pub days: u64,
    pub years: u32,
}

/// Shift `date` by a calendar offset (days first, then years).
///
/// A 29 February shifted to a non-leap year clamps to 28 February.
/// Returns `None` if the result leaves chrono's representable range.
pub fn date_out(date: DateTime<Utc>, offset: DateOffset) -> Option<DateTime<Utc>> {
    let shifted = date.checked_add_days(Days::new(offset.days))?;
    shifted.checked_add_months(Months::new(offset.years.checked_mul(12)?))
}

pub fn from_unix_seconds(ts: UnixSeconds) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// `YYYY-MM-DD` in UTC
pub fn to_readable(date: DateTime<Utc>) -> String {
    date.format(READABLE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date as midnight UTC
pub fn parse_readable(input: &str) -> Result<DateTime<Utc>, VeNationError> {
    let day = NaiveDate::parse_from_str(input.trim(), READABLE_FORMAT).map_err(|_| {
        VeNationError::InvalidDate {
            input: input.to_string(),
        }
    })?;
    Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Resolve the date the user entered against the selectable window.
///
/// An empty input restores `fallback` (the current expiration, or the
/// default one week out). Bounds are compared per day, the granularity of
/// the date picker.
pub fn select_date(
    input: &str,
    window: &TimeWindow,
    fallback: DateTime<Utc>,
) -> Result<DateTime<Utc>, VeNationError> {
    if input.trim().is_empty() {
        return Ok(fallback);
    }

    let date = parse_readable(input)?;
    if date.date_naive() < window.min().date_naive() {
        return Err(VeNationError::DateBeforeMinimum {
            date: to_readable(date),
            min: to_readable(window.min()),
        });
    }
    if date.date_naive() > window.max().date_naive() {
        return Err(VeNationError::DateAfterMaximum {
            date: to_readable(date),
            max: to_readable(window.max()),
        });
    }
    Ok(date)
}
