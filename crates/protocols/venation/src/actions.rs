//! veNATION action planning
//!
//! Turns the user's entered amount and date into the escrow contract calls
//! the wallet layer has to submit, plus the NATION allowance it must hold
//! first:
//! 1. Create   — `create_lock(value, unlock_time)`
//! 2. Increase — `increase_amount(delta)` and/or `increase_unlock_time(unlock_time)`
//! 3. Withdraw — `withdraw()` once the lock has expired

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nation_core::constants::TOKEN_DECIMALS;
use nation_core::units::parse_units;
use nation_core::{wei_string, Address, ContractConfig, ProtocolError, UnixSeconds, Wei};

use crate::calculator::{action_label, increase_capability, time_window};
use crate::constants::APPROVE_TEXT;
use crate::dates::to_readable;
use crate::state::{LockState, VeNationError};

/// A single call on the veNATION contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum ContractCall {
    CreateLock {
        #[serde(with = "wei_string")]
        value: Wei,
        #[serde(rename = "unlockTime")]
        unlock_time: UnixSeconds,
    },
    /// `value` is the amount added on top of the current lock
    IncreaseAmount {
        #[serde(with = "wei_string")]
        value: Wei,
    },
    IncreaseUnlockTime {
        #[serde(rename = "unlockTime")]
        unlock_time: UnixSeconds,
    },
    Withdraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockActionKind {
    Create,
    Increase,
    Withdraw,
}

/// NATION allowance the escrow needs before the action can go through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequirement {
    pub token: Address,
    pub spender: Address,
    #[serde(with = "wei_string")]
    pub amount_needed: Wei,
    pub approve_text: String,
    pub allow_unlimited: bool,
}

/// A planned user action, ready for the transaction layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockAction {
    pub kind: LockActionKind,
    pub label: String,
    /// Calls in submission order
    pub calls: Vec<ContractCall>,
    pub approval: Option<ApprovalRequirement>,
}

pub struct LockActionRequest<'a> {
    /// Current lock state
    pub state: &'a LockState,
    /// Final total amount the user wants locked (decimal string)
    pub lock_amount: &'a str,
    /// Unlock date picked by the user
    pub unlock_date: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Allowance needed for a lock of `lock_amount` total.
///
/// For an existing lock only the difference to the locked amount has to be
/// approved.
pub fn approval_requirement(
    config: &ContractConfig,
    state: &LockState,
    lock_amount: Wei,
) -> ApprovalRequirement {
    let amount_needed = match state.record() {
        Some(record) if record.locked_amount > 0 => {
            lock_amount.saturating_sub(record.locked_amount)
        }
        _ => lock_amount,
    };

    ApprovalRequirement {
        token: config.nation_token.clone(),
        spender: config.venation_token.clone(),
        amount_needed,
        approve_text: APPROVE_TEXT.to_string(),
        allow_unlimited: false,
    }
}

/// The "Max" amount: everything already locked plus the wallet balance
pub fn max_lock_amount(state: &LockState, nation_balance: Wei) -> Wei {
    state.locked_amount().saturating_add(nation_balance)
}

/// Plan the contract calls for the user's current input.
///
/// The unlock time is the picked date verbatim; the vesting estimate never
/// feeds into the plan.
pub fn plan_lock_action(
    config: &ContractConfig,
    req: &LockActionRequest<'_>,
) -> Result<LockAction, VeNationError> {
    let record = match req.state {
        LockState::Expired(_) => {
            return Ok(LockAction {
                kind: LockActionKind::Withdraw,
                label: action_label(req.state, &Default::default()),
                calls: vec![ContractCall::Withdraw],
                approval: None,
            })
        }
        LockState::NoLock => None,
        LockState::Active(record) => Some(record),
    };

    let amount = parse_units(req.lock_amount, TOKEN_DECIMALS)?;
    let window = time_window(req.state, req.now).ok_or_else(|| ProtocolError::StateUnavailable {
        reason: "no selectable lock window".to_string(),
    })?;
    let unlock_time = req.unlock_date.timestamp();

    let Some(record) = record else {
        if amount == 0 {
            return Err(VeNationError::ZeroAmount);
        }
        if !window.contains_day(req.unlock_date) {
            return Err(ProtocolError::DateOutOfRange {
                date: to_readable(req.unlock_date),
                min: to_readable(window.min()),
                max: to_readable(window.max()),
            }
            .into());
        }

        tracing::debug!(amount = %amount, unlock_time, "Planning create_lock");
        return Ok(LockAction {
            kind: LockActionKind::Create,
            label: action_label(req.state, &Default::default()),
            calls: vec![ContractCall::CreateLock {
                value: amount,
                unlock_time,
            }],
            approval: Some(approval_requirement(config, req.state, amount)),
        });
    };

    let capability = increase_capability(req.state, Some(amount), Some(req.unlock_date));
    if !capability.any() {
        return Err(VeNationError::NothingToIncrease);
    }

    let mut calls = Vec::with_capacity(2);
    if capability.amount {
        calls.push(ContractCall::IncreaseAmount {
            value: amount - record.locked_amount,
        });
    }
    if capability.time {
        if !window.contains_day(req.unlock_date) {
            let date = to_readable(req.unlock_date);
            return Err(if req.unlock_date > window.max() {
                VeNationError::DateAfterMaximum {
                    date,
                    max: to_readable(window.max()),
                }
            } else {
                VeNationError::DateBeforeMinimum {
                    date,
                    min: to_readable(window.min()),
                }
            });
        }
        calls.push(ContractCall::IncreaseUnlockTime { unlock_time });
    }

    tracing::debug!(?capability, calls = calls.len(), "Planning lock increase");
    Ok(LockAction {
        kind: LockActionKind::Increase,
        label: action_label(req.state, &capability),
        calls,
        approval: capability
            .amount
            .then(|| approval_requirement(config, req.state, amount)),
    })
}
