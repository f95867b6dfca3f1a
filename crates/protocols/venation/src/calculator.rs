//! veNATION Calculator
//!
//! Pure derivations over a lock snapshot and an explicit `now`. No async,
//! no chain access.
//!
//! The escrow balance decays linearly:
//!   venation = locked * (lock_end - now) / FOUR_YEARS
//!
//! The estimate inverts that relation to recover where the current decay
//! curve started, then projects the proposed amount onto the curve that
//! would run from there to the proposed unlock date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nation_core::{UnixSeconds, Wei};

use crate::constants::{
    ESTIMATE_COARSE_THRESHOLD, FOUR_YEARS_SECS, MAX_LOCK_OFFSET, MIN_INCREASE_DAYS,
    MIN_LOCK_OFFSET,
};
use crate::dates::{date_out, from_unix_seconds, DateOffset};
use crate::state::{IncreaseCapability, LockRecord, LockState, TimeWindow, VestingEstimate};

/// Classify a lock record at time `now`.
///
/// Absent records and records with nothing locked are `NoLock`. A lock is
/// expired once `now` reaches a non-zero `lock_end`.
pub fn classify_lock(record: Option<&LockRecord>, now: DateTime<Utc>) -> LockState {
    match record {
        Some(record) if record.locked_amount > 0 => {
            if record.lock_end > 0 && now.timestamp() >= record.lock_end {
                LockState::Expired(*record)
            } else {
                LockState::Active(*record)
            }
        }
        _ => LockState::NoLock,
    }
}

/// Selectable range for the lock expiration date.
///
/// A fresh lock runs from one week to four calendar years out. An existing
/// lock can only be extended, so its window starts at the current expiration;
/// the upper bound is still four years from now. Returns `None` when no valid
/// window exists: an expired lock, a minimum already in the past (an unset
/// expiration), or an expiration beyond the four-year horizon.
pub fn time_window(state: &LockState, now: DateTime<Utc>) -> Option<TimeWindow> {
    let min = match state {
        LockState::Expired(_) => return None,
        LockState::Active(record) => from_unix_seconds(record.lock_end)?,
        LockState::NoLock => date_out(now, MIN_LOCK_OFFSET)?,
    };
    if min < now {
        tracing::warn!(min = %min, "Lock window would start in the past");
        return None;
    }
    let max = date_out(now, MAX_LOCK_OFFSET)?;

    match TimeWindow::new(min, max) {
        Ok(window) => Some(window),
        Err(e) => {
            tracing::warn!("No selectable lock window: {}", e);
            None
        }
    }
}

/// Which parts of the existing lock the proposed values increase.
///
/// The amount must strictly exceed the locked amount; the date must be
/// strictly later than the current expiration plus [`MIN_INCREASE_DAYS`].
/// Without a lock nothing can be increased and both flags are false.
pub fn increase_capability(
    state: &LockState,
    proposed_amount: Option<Wei>,
    proposed_date: Option<DateTime<Utc>>,
) -> IncreaseCapability {
    let Some(record) = state.record() else {
        return IncreaseCapability::default();
    };

    let amount = proposed_amount.is_some_and(|amount| amount > record.locked_amount);

    let earliest_increase = from_unix_seconds(record.lock_end).and_then(|end| {
        date_out(
            end,
            DateOffset {
                days: MIN_INCREASE_DAYS,
                years: 0,
            },
        )
    });
    let time = match (proposed_date, earliest_increase) {
        (Some(date), Some(earliest)) => date > earliest,
        _ => false,
    };

    IncreaseCapability { amount, time }
}

/// Text of the primary action button
pub fn action_label(state: &LockState, capability: &IncreaseCapability) -> String {
    match state {
        LockState::NoLock => "Lock".to_string(),
        LockState::Expired(_) => "Withdraw".to_string(),
        LockState::Active(_) => match (capability.amount, capability.time) {
            (true, true) => "Increase lock amount & time".to_string(),
            (true, false) => "Increase lock amount".to_string(),
            (false, true) => "Increase lock time".to_string(),
            (false, false) => "Increase lock".to_string(),
        },
    }
}

/// Inputs of the vesting estimate, all times in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    /// Proposed total NATION locked (tokens)
    pub nation_amount: Option<f64>,
    /// Current veNATION balance (tokens)
    pub venation_amount: f64,
    /// Proposed unlock date
    pub target_time: UnixSeconds,
    /// Time origin of the current decay curve: the current expiration of an
    /// existing lock, `now` otherwise
    pub origin_time: UnixSeconds,
    /// Latest selectable unlock date
    pub max_time: UnixSeconds,
}

/// Start of the decay curve implied by the current balance-to-amount ratio.
///
/// Returns `None` when `nation_amount` is zero or either input is not finite.
pub fn vesting_start(nation_amount: f64, venation_amount: f64, origin_time: f64) -> Option<f64> {
    if nation_amount == 0.0 || !nation_amount.is_finite() || !venation_amount.is_finite() {
        return None;
    }
    Some(origin_time - (venation_amount / nation_amount) * FOUR_YEARS_SECS as f64)
}

/// Estimate the veNATION balance the proposed lock would yield.
///
/// Advisory only: contract calls always use the literal amount and date.
/// Degenerate inputs (no amount, zero-length curve, non-finite result)
/// estimate zero, and a negative projection is floored at zero.
pub fn estimate_venation(input: &EstimateInput) -> VestingEstimate {
    let Some(nation_amount) = input.nation_amount.filter(|a| *a != 0.0 && a.is_finite()) else {
        return VestingEstimate::zero();
    };
    let Some(start) = vesting_start(nation_amount, input.venation_amount, input.origin_time as f64)
    else {
        return VestingEstimate::zero();
    };

    let span = input.max_time as f64 - start;
    if span == 0.0 {
        return VestingEstimate::zero();
    }

    let percentage = (input.target_time as f64 - start) / span;
    let value = nation_amount * percentage;
    if !value.is_finite() || value <= 0.0 {
        return VestingEstimate::zero();
    }

    VestingEstimate {
        value,
        display: round_for_display(value),
    }
}

/// 2 decimals above one token, 8 below, so small balances stay visible.
/// Exact ties round up (2.125 shows as "2.13").
pub fn round_for_display(value: f64) -> String {
    let places = if value > ESTIMATE_COARSE_THRESHOLD { 2 } else { 8 };
    let scale = 10f64.powi(places as i32);
    format!("{:.*}", places, (value * scale).round() / scale)
}

/// One way to reach a veNATION target: `nation_amount` locked for `years`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportExample {
    pub nation_amount: f64,
    pub years: u32,
}

/// Ways to reach the passport threshold: 1x for 4 years, 2x for 2, 4x for 1
pub fn passport_lock_examples(required_balance: f64) -> Vec<PassportExample> {
    [(1.0, 4), (2.0, 2), (4.0, 1)]
        .into_iter()
        .map(|(factor, years)| PassportExample {
            nation_amount: required_balance * factor,
            years,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_YEAR_APPROX;
    use crate::dates::parse_readable;
    use chrono::{Duration, TimeZone};
    use nation_core::constants::WEI_PER_TOKEN;

    const YEAR: i64 = SECONDS_PER_YEAR_APPROX;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn record(tokens: u128, lock_end: DateTime<Utc>) -> LockRecord {
        LockRecord {
            locked_amount: tokens * WEI_PER_TOKEN,
            lock_end: lock_end.timestamp(),
        }
    }

    // ---- classifier ----

    #[test]
    fn test_absent_or_empty_record_is_no_lock() {
        assert_eq!(classify_lock(None, now()), LockState::NoLock);

        for lock_end in [0, 1, now().timestamp() - 10, now().timestamp() + 10] {
            let empty = LockRecord {
                locked_amount: 0,
                lock_end,
            };
            let state = classify_lock(Some(&empty), now());
            assert!(!state.has_lock());
            assert!(!state.has_expired());
        }
    }

    #[test]
    fn test_past_or_current_lock_end_is_expired() {
        let at_end = record(100, now());
        assert!(classify_lock(Some(&at_end), now()).has_expired());

        let past = record(100, now() - Duration::days(30));
        assert_eq!(classify_lock(Some(&past), now()), LockState::Expired(past));
    }

    #[test]
    fn test_future_lock_end_is_active() {
        let future = record(100, now() + Duration::days(30));
        assert_eq!(classify_lock(Some(&future), now()), LockState::Active(future));
    }

    #[test]
    fn test_zero_lock_end_never_expires() {
        let unset = LockRecord {
            locked_amount: WEI_PER_TOKEN,
            lock_end: 0,
        };
        assert!(matches!(classify_lock(Some(&unset), now()), LockState::Active(_)));
    }

    // ---- time window ----

    #[test]
    fn test_window_without_lock() {
        let window = time_window(&LockState::NoLock, now()).unwrap();
        assert_eq!(window.min(), now() + Duration::days(7));
        assert_eq!(window.max(), Utc.with_ymd_and_hms(2030, 10, 19, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_window_with_lock_starts_at_lock_end() {
        let lock_end = now() + Duration::days(400);
        let state = LockState::Active(record(10, lock_end));
        let window = time_window(&state, now()).unwrap();
        assert_eq!(window.min(), lock_end);
        // Max is measured from now, not from the lock end
        assert_eq!(window.max(), Utc.with_ymd_and_hms(2030, 10, 19, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_window_min_never_exceeds_max() {
        let lock_ends = [
            now() - Duration::days(100),
            now(),
            now() + Duration::days(1),
            now() + Duration::days(1000),
            now() + Duration::days(1460),
        ];
        for lock_end in lock_ends {
            let state = classify_lock(Some(&record(1, lock_end)), now());
            if let Some(window) = time_window(&state, now()) {
                assert!(window.min() <= window.max());
                assert!(window.min() >= now());
            }
        }
        let window = time_window(&LockState::NoLock, now()).unwrap();
        assert!(window.min() <= window.max());
    }

    #[test]
    fn test_window_never_starts_in_the_past() {
        let unset = LockState::Active(LockRecord {
            locked_amount: WEI_PER_TOKEN,
            lock_end: 0,
        });
        assert!(time_window(&unset, now()).is_none());

        let expired = classify_lock(Some(&record(5, now() - Duration::days(30))), now());
        assert!(expired.has_expired());
        assert!(time_window(&expired, now()).is_none());
    }

    #[test]
    fn test_window_rejects_lock_end_past_horizon() {
        let state = LockState::Active(record(1, now() + Duration::days(1500)));
        assert!(time_window(&state, now()).is_none());
    }

    // ---- increase capability ----

    #[test]
    fn test_no_lock_cannot_increase() {
        let cap = increase_capability(
            &LockState::NoLock,
            Some(1_000 * WEI_PER_TOKEN),
            Some(now() + Duration::days(365)),
        );
        assert_eq!(cap, IncreaseCapability::default());
    }

    #[test]
    fn test_amount_increase_is_strict() {
        let state = LockState::Active(record(100, now() + Duration::days(365)));
        let locked = 100 * WEI_PER_TOKEN;

        assert!(!increase_capability(&state, Some(locked), None).amount);
        assert!(!increase_capability(&state, Some(locked - 1), None).amount);
        assert!(increase_capability(&state, Some(locked + 1), None).amount);
        assert!(!increase_capability(&state, None, None).amount);
    }

    #[test]
    fn test_time_increase_needs_more_than_a_week() {
        // Four-year lock created a year ago: three years remain
        let created = now() - Duration::days(365);
        let lock_end = date_out(created, DateOffset { days: 0, years: 4 }).unwrap();
        let state = LockState::Active(record(100, lock_end));

        let three_days = lock_end + Duration::days(3);
        assert!(!increase_capability(&state, None, Some(three_days)).time);

        let exactly_week = lock_end + Duration::days(7);
        assert!(!increase_capability(&state, None, Some(exactly_week)).time);

        let eight_days = lock_end + Duration::days(8);
        assert!(increase_capability(&state, None, Some(eight_days)).time);
    }

    #[test]
    fn test_action_labels() {
        let state = LockState::Active(record(1, now() + Duration::days(10)));
        let cap = |amount, time| IncreaseCapability { amount, time };

        assert_eq!(action_label(&LockState::NoLock, &cap(false, false)), "Lock");
        assert_eq!(action_label(&state, &cap(true, false)), "Increase lock amount");
        assert_eq!(action_label(&state, &cap(false, true)), "Increase lock time");
        assert_eq!(action_label(&state, &cap(true, true)), "Increase lock amount & time");
        assert_eq!(action_label(&state, &cap(false, false)), "Increase lock");
        assert_eq!(
            action_label(&LockState::Expired(record(1, now())), &cap(false, false)),
            "Withdraw"
        );
    }

    // ---- vesting estimate ----

    #[test]
    fn test_estimate_zero_amount() {
        for nation_amount in [None, Some(0.0), Some(f64::NAN)] {
            let estimate = estimate_venation(&EstimateInput {
                nation_amount,
                venation_amount: 500.0,
                target_time: 1_000,
                origin_time: 0,
                max_time: 2_000,
            });
            assert_eq!(estimate, VestingEstimate::zero());
        }
    }

    #[test]
    fn test_estimate_recovers_vesting_start() {
        // Half the amount as veNATION means the curve started two years before origin
        let t = now().timestamp();
        let input = |target_time| EstimateInput {
            nation_amount: Some(1_000.0),
            venation_amount: 500.0,
            target_time,
            origin_time: t,
            max_time: t + 4 * YEAR,
        };

        let full = estimate_venation(&input(t + 4 * YEAR));
        assert_eq!(full.display, "1000.00");

        let half = estimate_venation(&input(t + YEAR));
        assert_eq!(half.value, 500.0);
        assert_eq!(half.display, "500.00");
    }

    #[test]
    fn test_estimate_fresh_lock_is_linear_in_duration() {
        let t = now().timestamp();
        let estimate = estimate_venation(&EstimateInput {
            nation_amount: Some(100.0),
            venation_amount: 0.0,
            target_time: t + 2 * YEAR,
            origin_time: t,
            max_time: t + 4 * YEAR,
        });
        assert_eq!(estimate.display, "50.00");
    }

    #[test]
    fn test_estimate_small_values_keep_eight_decimals() {
        let t = now().timestamp();
        let estimate = estimate_venation(&EstimateInput {
            nation_amount: Some(0.001),
            venation_amount: 0.0,
            target_time: t + 1_234,
            origin_time: t,
            max_time: t + 10_000_000,
        });
        assert_eq!(estimate.display, "0.00000012");
    }

    #[test]
    fn test_estimate_zero_span_is_zero() {
        let estimate = estimate_venation(&EstimateInput {
            nation_amount: Some(10.0),
            venation_amount: 0.0,
            target_time: 500,
            origin_time: 100,
            max_time: 100,
        });
        assert_eq!(estimate, VestingEstimate::zero());
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(123.456789), "123.46");
        assert_eq!(round_for_display(0.0000001234), "0.00000012");
        assert_eq!(round_for_display(1.0), "1.00000000");
        // Ties go up, not to even
        assert_eq!(round_for_display(2.125), "2.13");
    }

    #[test]
    fn test_estimate_with_existing_lock_origin() {
        // A 100 NATION lock with two approximate years left holds 50 veNATION.
        // Using the lock end as origin puts the curve start at now, so
        // extending to the max yields the full amount.
        let t = now().timestamp();
        let estimate = estimate_venation(&EstimateInput {
            nation_amount: Some(100.0),
            venation_amount: 50.0,
            target_time: t + 4 * YEAR,
            origin_time: t + 2 * YEAR,
            max_time: t + 4 * YEAR,
        });
        assert_eq!(estimate.display, "100.00");
    }

    #[test]
    fn test_passport_examples() {
        let examples = passport_lock_examples(20.0);
        assert_eq!(
            examples,
            vec![
                PassportExample { nation_amount: 20.0, years: 4 },
                PassportExample { nation_amount: 40.0, years: 2 },
                PassportExample { nation_amount: 80.0, years: 1 },
            ]
        );
    }

    #[test]
    fn test_estimate_target_from_picker_date() {
        let t = now().timestamp();
        let target = parse_readable("2028-10-19").unwrap().timestamp();
        let estimate = estimate_venation(&EstimateInput {
            nation_amount: Some(10.0),
            venation_amount: 0.0,
            target_time: target,
            origin_time: t,
            max_time: t + 4 * YEAR,
        });
        assert!(estimate.value > 4.9 && estimate.value < 5.1, "{}", estimate.value);
    }
}
