//! veNATION lock endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use nation_core::{ContractConfig, ProtocolError};
use venation::constants::{
    LOCK_DURATION_PRESETS, MAX_LOCK_YEARS, MIN_INCREASE_DAYS, MIN_LOCK_DAYS,
};
use venation::dates::{from_unix_seconds, parse_readable};
use venation::{
    classify_lock, estimate_venation, plan_lock_action, EstimateInput, LockAction,
    LockActionRequest, LockPageInputs, LockView, VeNationError, VestingEstimate,
};

use crate::dto::{ApiError, DurationPresetDto, LockActionRequestDto, VeNationConfigResponse};
use crate::AppState;

/// Create veNATION routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config).post(configure))
        .route("/view", post(view))
        .route("/estimate", post(estimate))
        .route("/action", post(action))
}

fn error_response(e: VeNationError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

/// GET /venation/config - Contract addresses and lock parameters
pub async fn get_config(State(state): State<AppState>) -> Json<VeNationConfigResponse> {
    let config = state.config().await;

    let duration_presets = LOCK_DURATION_PRESETS
        .iter()
        .map(|(label, offset)| DurationPresetDto {
            label: label.to_string(),
            days: offset.days,
            years: offset.years,
        })
        .collect();

    Json(VeNationConfigResponse {
        chain: config.chain,
        chain_id: config.chain.chain_id(),
        nation_token: config.contracts.nation_token,
        venation_token: config.contracts.venation_token,
        passport_required_balance: config.contracts.passport_required_balance,
        rewards_multiplier: config.contracts.venation_rewards_multiplier,
        min_lock_days: MIN_LOCK_DAYS,
        max_lock_years: MAX_LOCK_YEARS,
        min_increase_days: MIN_INCREASE_DAYS,
        duration_presets,
    })
}

/// POST /venation/config - Replace contract addresses and page parameters
pub async fn configure(
    State(state): State<AppState>,
    Json(request): Json<ContractConfig>,
) -> Result<Json<VeNationConfigResponse>, (StatusCode, Json<ApiError>)> {
    state.set_contracts(request).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(e.to_string())),
        )
    })?;

    Ok(get_config(State(state)).await)
}

/// POST /venation/view - Derive the lock page state from chain snapshots
pub async fn view(
    State(state): State<AppState>,
    Json(inputs): Json<LockPageInputs>,
) -> Json<LockView> {
    let contracts = state.contracts().await;
    let view = LockView::derive(&inputs, &contracts, Utc::now());

    tracing::debug!(
        has_lock = view.has_lock,
        has_expired = view.has_expired,
        label = %view.action_label,
        "Derived lock view"
    );
    Json(view)
}

/// POST /venation/estimate - Estimate veNATION for explicit inputs
pub async fn estimate(Json(input): Json<EstimateInput>) -> Json<VestingEstimate> {
    Json(estimate_venation(&input))
}

/// POST /venation/action - Plan contract calls for the lock form
pub async fn action(
    State(state): State<AppState>,
    Json(request): Json<LockActionRequestDto>,
) -> Result<Json<LockAction>, (StatusCode, Json<ApiError>)> {
    if request.lock.as_ref().is_some_and(|lock| lock.loading) {
        return Err(error_response(
            ProtocolError::StateUnavailable {
                reason: "lock snapshot is still loading".to_string(),
            }
            .into(),
        ));
    }

    let now = Utc::now();
    let record = request.lock.as_ref().and_then(|lock| lock.record());
    let lock_state = classify_lock(record.as_ref(), now);

    let unlock_date = if request.lock_date.trim().is_empty() {
        lock_state
            .record()
            .and_then(|r| from_unix_seconds(r.lock_end))
            .unwrap_or(now)
    } else {
        parse_readable(&request.lock_date).map_err(error_response)?
    };

    let contracts = state.contracts().await;
    let action = plan_lock_action(
        &contracts,
        &LockActionRequest {
            state: &lock_state,
            lock_amount: &request.lock_amount,
            unlock_date,
            now,
        },
    )
    .map_err(|e| {
        tracing::info!("Rejected lock action: {}", e);
        error_response(e)
    })?;

    Ok(Json(action))
}
