//! Music generation routes

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use melodia_billing::PlanPermissions;
use melodia_shared::GenerationMode;
use melodia_studio::{validate, ParameterValues, RequestAssembler, Track};
use serde::{Deserialize, Serialize};

use crate::{
    caller::Caller,
    error::{ApiError, ApiResult},
    state::AppState,
};

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateMusicRequest {
    pub mode: String,
    /// Form values keyed by parameter id
    #[serde(default)]
    pub values: ParameterValues,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub tracks: Vec<Track>,
    pub total: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// Validate, assemble and generate a track for the caller.
///
/// The level always comes from the ledger; clients cannot claim one. The
/// caller's slot is held from the quota check until the track is recorded.
pub async fn generate(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(req): Json<GenerateMusicRequest>,
) -> ApiResult<(StatusCode, Json<Track>)> {
    let mode: GenerationMode = req.mode.parse()?;
    let level = state.ledger().level(&caller.user_id);

    state.catalog.ensure_mode_available(mode, level)?;

    let slot = state.generator.acquire(&caller.user_id).await;
    let permissions = PlanPermissions::for_level(level);
    if let Some(limit) = permissions.daily_limit {
        let generated_today = state.generator.generated_today(&caller.user_id).await?;
        if !permissions.allows_generation(generated_today) {
            tracing::info!(
                user = %caller.user_id,
                level = %level,
                generated_today,
                "daily generation limit reached"
            );
            return Err(ApiError::QuotaExceeded(format!(
                "The {} plan allows {} generations per day",
                level.display_name(),
                limit
            )));
        }
    }

    let parameters = state.catalog.visible_parameters(mode, level)?;
    let report = validate(&parameters, &req.values);
    if !report.is_valid() {
        return Err(ApiError::Validation(report));
    }

    let request = RequestAssembler::new(state.catalog).assemble(mode, level, &parameters, &req.values)?;
    let track = state.generator.generate(&slot, request).await;

    Ok((StatusCode::CREATED, Json(track)))
}

/// The caller's tracks, oldest first
pub async fn history(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<HistoryResponse>> {
    let tracks = state.generator.history().list_for(&caller.user_id).await?;

    Ok(Json(HistoryResponse {
        total: tracks.len(),
        tracks,
    }))
}
