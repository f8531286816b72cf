//! Catalog routes
//!
//! Read-only views of the generation catalog as seen by one subscription
//! level. `level` defaults to the caller's ledger level.

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use melodia_shared::{GenerationMode, SubscriptionLevel};
use melodia_studio::{
    durations_for_level, styles_for_level, ChoiceOption, ModeSpec, ModelSpec, ResolvedParameter,
};
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
pub struct LevelQuery {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModeEntry {
    #[serde(flatten)]
    pub spec: &'static ModeSpec,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ModesResponse {
    pub level: SubscriptionLevel,
    pub available: Vec<GenerationMode>,
    pub modes: Vec<ModeEntry>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub mode: GenerationMode,
    pub level: SubscriptionLevel,
    pub models: Vec<&'static ModelSpec>,
}

#[derive(Debug, Serialize)]
pub struct ParametersResponse {
    pub mode: GenerationMode,
    pub level: SubscriptionLevel,
    /// Whether `level` may submit in `mode` at all
    pub mode_available: bool,
    pub parameters: Vec<ResolvedParameter>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub level: SubscriptionLevel,
    pub options: Vec<ChoiceOption>,
}

// =============================================================================
// Helpers
// =============================================================================

/// The requested level, or the caller's current one
fn level_for(state: &AppState, caller: &Caller, raw: Option<&str>) -> ApiResult<SubscriptionLevel> {
    match raw {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(state.ledger().level(&caller.user_id)),
    }
}

fn required_mode(raw: Option<&str>) -> ApiResult<GenerationMode> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest("mode is required".to_string()))?;
    Ok(raw.parse()?)
}

// =============================================================================
// Handlers
// =============================================================================

/// List every mode with whether the level can use it
pub async fn list_modes(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<LevelQuery>,
) -> ApiResult<Json<ModesResponse>> {
    let level = level_for(&state, &caller, query.level.as_deref())?;
    let available = state.catalog.available_modes(level);

    let modes = state
        .catalog
        .modes()
        .iter()
        .map(|spec| ModeEntry {
            spec,
            available: available.contains(&spec.id),
        })
        .collect();

    Ok(Json(ModesResponse {
        level,
        available,
        modes,
    }))
}

/// Models selectable for a mode
pub async fn list_models(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<ModeQuery>,
) -> ApiResult<Json<ModelsResponse>> {
    let mode = required_mode(query.mode.as_deref())?;
    let level = level_for(&state, &caller, query.level.as_deref())?;

    Ok(Json(ModelsResponse {
        mode,
        level,
        models: state.catalog.models_for_mode(mode, level),
    }))
}

/// The form fields to show for a (mode, level) pair
pub async fn list_parameters(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<ModeQuery>,
) -> ApiResult<Json<ParametersResponse>> {
    let mode = required_mode(query.mode.as_deref())?;
    let level = level_for(&state, &caller, query.level.as_deref())?;

    let parameters = state.catalog.visible_parameters(mode, level)?;

    Ok(Json(ParametersResponse {
        mode,
        level,
        mode_available: state.catalog.ensure_mode_available(mode, level).is_ok(),
        parameters,
    }))
}

pub async fn list_styles(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<LevelQuery>,
) -> ApiResult<Json<OptionsResponse>> {
    let level = level_for(&state, &caller, query.level.as_deref())?;
    Ok(Json(OptionsResponse {
        level,
        options: styles_for_level(level),
    }))
}

pub async fn list_durations(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(query): Query<LevelQuery>,
) -> ApiResult<Json<OptionsResponse>> {
    let level = level_for(&state, &caller, query.level.as_deref())?;
    Ok(Json(OptionsResponse {
        level,
        options: durations_for_level(level),
    }))
}
