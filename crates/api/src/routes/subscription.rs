//! Subscription routes

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use melodia_billing::SubscriptionStatus;

use crate::{caller::Caller, state::AppState};

/// The caller's subscription and what it unlocks
pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Json<SubscriptionStatus> {
    Json(state.subscriptions.status(&caller.user_id))
}

/// Forget the caller's subscription (logout), returning them to the free plan
pub async fn clear_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> StatusCode {
    state.subscriptions.cancel(&caller.user_id);
    StatusCode::NO_CONTENT
}
