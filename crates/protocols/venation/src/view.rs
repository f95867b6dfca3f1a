//! Lock page view
//!
//! Folds every snapshot and user input of the lock page into the values the
//! UI renders. Inputs may be partially loaded; anything missing degrades to
//! the no-lock view instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nation_core::constants::{TOKEN_DECIMALS, WEI_PER_TOKEN};
use nation_core::units::{format_units, format_units_fixed, parse_units, wei_to_f64};
use nation_core::{Address, ContractConfig, Wei};

use crate::actions::{approval_requirement, max_lock_amount, ApprovalRequirement};
use crate::calculator::{
    action_label, classify_lock, estimate_venation, increase_capability, passport_lock_examples,
    time_window, EstimateInput, PassportExample,
};
use crate::constants::{
    DATE_HINT_EXISTING_LOCK, DATE_HINT_NEW_LOCK, LOCKED_DISPLAY_PLACES, MIN_LOCK_OFFSET,
    PASSPORT_BALANCE_BUFFER, VENATION_DISPLAY_PLACES_LARGE, VENATION_DISPLAY_PLACES_SMALL,
};
use crate::dates::{date_out, from_unix_seconds, select_date, to_readable};
use crate::state::{
    BalanceSnapshot, IncreaseCapability, LockSnapshot, LockState, TimeWindow, VestingEstimate,
};

/// Everything the lock page knows at one render
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockPageInputs {
    /// Connected wallet; `None` when disconnected
    pub address: Option<String>,
    pub nation_balance: Option<BalanceSnapshot>,
    pub venation_balance: Option<BalanceSnapshot>,
    pub lock: Option<LockSnapshot>,
    /// Final total amount typed by the user
    pub lock_amount: Option<String>,
    /// Unlock date picked by the user (`YYYY-MM-DD`)
    pub lock_date: Option<String>,
    /// The user touched the amount or date inputs
    #[serde(default)]
    pub wants_to_increase: bool,
}

/// Lock window as date-picker bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadableWindow {
    pub min: String,
    pub max: String,
}

impl From<&TimeWindow> for ReadableWindow {
    fn from(window: &TimeWindow) -> Self {
        Self {
            min: to_readable(window.min()),
            max: to_readable(window.max()),
        }
    }
}

/// Derived lock page state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockView {
    pub wallet_connected: bool,
    pub lock_state: LockState,
    pub has_lock: bool,
    pub has_expired: bool,
    /// Locked NATION, 2 decimals
    pub locked_amount: Option<String>,
    /// Current expiration date
    pub lock_end: Option<String>,
    /// Current veNATION balance for display
    pub venation_balance: Option<String>,
    /// NATION available in the wallet
    pub nation_available: Option<String>,
    pub time_window: Option<ReadableWindow>,
    /// Amount the inputs resolve to (typed, or the current lock as default)
    pub lock_amount: String,
    /// Date the inputs resolve to
    pub selected_date: Option<String>,
    pub date_hint: &'static str,
    pub capability: IncreaseCapability,
    pub action_label: String,
    pub can_submit: bool,
    /// Only present once the user edited the amount or date
    pub estimate: Option<VestingEstimate>,
    pub approval: Option<ApprovalRequirement>,
    /// Value for the "Max" button
    pub max_lock_amount: Option<String>,
    /// Why the current input cannot be used, if it cannot
    pub input_error: Option<String>,
    pub passport_required_balance: f64,
    pub suggested_venation: f64,
    pub passport_examples: Vec<PassportExample>,
    pub rewards_multiplier: f64,
}

impl LockView {
    pub fn derive(inputs: &LockPageInputs, config: &ContractConfig, now: DateTime<Utc>) -> Self {
        let wallet_connected = match inputs.address.as_deref() {
            Some(addr) => match Address::parse(addr) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!("Treating wallet as disconnected: {}", e);
                    false
                }
            },
            None => false,
        };

        let record = if wallet_connected {
            inputs.lock.as_ref().and_then(LockSnapshot::record)
        } else {
            None
        };
        let state = classify_lock(record.as_ref(), now);
        let window = time_window(&state, now);

        let nation_balance = inputs
            .nation_balance
            .as_ref()
            .filter(|_| wallet_connected)
            .and_then(BalanceSnapshot::value);
        let venation_balance = inputs
            .venation_balance
            .as_ref()
            .filter(|_| wallet_connected)
            .and_then(BalanceSnapshot::value);

        let mut input_error = None;

        // Amount defaults to the current lock so increases start from it
        let lock_amount = match inputs.lock_amount.as_deref().map(str::trim) {
            Some(typed) if !typed.is_empty() => typed.to_string(),
            _ => match state.record() {
                Some(record) => format_units(record.locked_amount, TOKEN_DECIMALS),
                None => String::new(),
            },
        };
        let parsed_amount = if lock_amount.is_empty() {
            None
        } else {
            match parse_units(&lock_amount, TOKEN_DECIMALS) {
                Ok(amount) => Some(amount),
                Err(e) => {
                    input_error = Some(e.to_string());
                    None
                }
            }
        };

        let default_date = match state.record() {
            Some(record) => from_unix_seconds(record.lock_end),
            None => date_out(now, MIN_LOCK_OFFSET),
        };
        let selected_date = match (&window, default_date) {
            (Some(window), Some(fallback)) => {
                let typed = inputs.lock_date.as_deref().unwrap_or_default();
                match select_date(typed, window, fallback) {
                    Ok(date) => Some(date),
                    Err(e) => {
                        if input_error.is_none() {
                            input_error = Some(e.to_string());
                        }
                        Some(fallback)
                    }
                }
            }
            (None, fallback) | (Some(_), fallback @ None) => fallback,
        };

        let capability = if state.has_lock() {
            increase_capability(&state, parsed_amount, selected_date)
        } else {
            IncreaseCapability::default()
        };

        let can_submit = wallet_connected
            && match state {
                LockState::NoLock => {
                    parsed_amount.is_some_and(|a| a > 0)
                        && match (&window, selected_date) {
                            (Some(window), Some(date)) => window.contains_day(date),
                            _ => false,
                        }
                }
                LockState::Active(_) => window.is_some() && capability.any(),
                LockState::Expired(_) => true,
            };

        let estimate = inputs.wants_to_increase.then(|| {
            let origin = match state {
                LockState::Active(record) => record.lock_end,
                _ => now.timestamp(),
            };
            match (&window, selected_date) {
                (Some(window), Some(date)) => estimate_venation(&EstimateInput {
                    nation_amount: parsed_amount.map(|a| wei_to_f64(a, TOKEN_DECIMALS)),
                    venation_amount: venation_balance
                        .map_or(0.0, |v| wei_to_f64(v, TOKEN_DECIMALS)),
                    target_time: date.timestamp(),
                    origin_time: origin,
                    max_time: window.max().timestamp(),
                }),
                _ => VestingEstimate::zero(),
            }
        });

        let approval = match (state, parsed_amount) {
            (LockState::Expired(_), _) | (_, None) => None,
            (_, Some(amount)) => Some(approval_requirement(config, &state, amount)),
        };

        let required = config.passport_required_balance;

        Self {
            wallet_connected,
            has_lock: state.has_lock(),
            has_expired: state.has_expired(),
            locked_amount: state.record().map(|r| {
                format_units_fixed(r.locked_amount, TOKEN_DECIMALS, LOCKED_DISPLAY_PLACES)
            }),
            lock_end: state
                .record()
                .and_then(|r| from_unix_seconds(r.lock_end))
                .map(to_readable),
            venation_balance: venation_balance.map(format_venation),
            nation_available: inputs
                .nation_balance
                .as_ref()
                .filter(|b| wallet_connected && !b.loading)
                .map(|b| b.formatted.clone()),
            time_window: window.as_ref().map(ReadableWindow::from),
            lock_amount,
            selected_date: selected_date.map(to_readable),
            date_hint: if state.has_lock() {
                DATE_HINT_EXISTING_LOCK
            } else {
                DATE_HINT_NEW_LOCK
            },
            capability,
            action_label: action_label(&state, &capability),
            can_submit,
            estimate,
            approval,
            max_lock_amount: nation_balance
                .map(|balance| format_units(max_lock_amount(&state, balance), TOKEN_DECIMALS)),
            input_error,
            passport_required_balance: required,
            suggested_venation: required + PASSPORT_BALANCE_BUFFER,
            passport_examples: passport_lock_examples(required),
            rewards_multiplier: config.venation_rewards_multiplier,
            lock_state: state,
        }
    }
}

/// 2 decimals above one veNATION, 6 below
fn format_venation(balance: Wei) -> String {
    let places = if balance > WEI_PER_TOKEN {
        VENATION_DISPLAY_PLACES_LARGE
    } else {
        VENATION_DISPLAY_PLACES_SMALL
    };
    format_units_fixed(balance, TOKEN_DECIMALS, places)
}
