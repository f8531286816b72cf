//! Pricing routes

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use melodia_billing::{
    plans, quote, PaymentDetails, PlanQuote, PricingPlan, SubscriptionConfirmation,
};
use serde::{Deserialize, Serialize};

use crate::{caller::Caller, error::ApiResult, state::AppState};

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: &'static [PricingPlan],
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub plan: PlanQuote,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub plan_id: String,
    #[serde(default)]
    pub payment_info: PaymentDetails,
}

pub async fn list_plans() -> Json<PlansResponse> {
    Json(PlansResponse { plans: plans() })
}

/// A plan with its current discount
pub async fn get_plan(Path(plan_id): Path<String>) -> ApiResult<Json<QuoteResponse>> {
    Ok(Json(QuoteResponse {
        plan: quote(&plan_id)?,
        timestamp: Utc::now(),
    }))
}

/// Charge the caller and switch their plan
pub async fn subscribe(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<SubscribeRequest>,
) -> ApiResult<Json<SubscriptionConfirmation>> {
    let confirmation = state
        .subscriptions
        .subscribe(&caller.user_id, &req.plan_id, &req.payment_info)?;
    Ok(Json(confirmation))
}
