//! veNATION Lock Protocol Implementation
//!
//! Users lock NATION in the voting escrow contract until a chosen date and
//! receive veNATION, a balance that decays linearly to zero at the lock's
//! expiration. A lock can only be extended (more NATION, later date), never
//! shortened; once expired it must be withdrawn.
//!
//! Everything here is a pure function of chain snapshots plus an explicit
//! `now`. Fetching balances and submitting transactions happen elsewhere.

pub mod actions;
pub mod calculator;
pub mod constants;
pub mod dates;
pub mod state;
pub mod view;

pub use actions::{
    approval_requirement, max_lock_amount, plan_lock_action, ApprovalRequirement, ContractCall,
    LockAction, LockActionKind, LockActionRequest,
};
pub use calculator::{
    action_label, classify_lock, estimate_venation, increase_capability, time_window,
    EstimateInput,
};
pub use constants::LOCK_DURATION_PRESETS;
pub use state::{
    BalanceSnapshot, IncreaseCapability, LockRecord, LockSnapshot, LockState, TimeWindow,
    VeNationError, VestingEstimate,
};
pub use view::{LockPageInputs, LockView};
