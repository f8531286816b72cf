//! API routes

pub mod catalog;
pub mod health;
pub mod music;
pub mod pricing;
pub mod subscription;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{caller::identify_caller, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    let mut api_v1_routes = Router::new()
        // Catalog
        .route("/catalog/modes", get(catalog::list_modes))
        .route("/catalog/models", get(catalog::list_models))
        .route("/catalog/parameters", get(catalog::list_parameters))
        .route("/catalog/options/styles", get(catalog::list_styles))
        .route("/catalog/options/durations", get(catalog::list_durations))
        // Generation
        .route("/music/generate", post(music::generate))
        .route("/music/history", get(music::history))
        // Subscription
        .route(
            "/subscription",
            get(subscription::get_subscription).delete(subscription::clear_subscription),
        );

    // Pricing routes - only when runtime config allows
    if state.config.enable_billing {
        api_v1_routes = api_v1_routes
            .route("/pricing/plans", get(pricing::list_plans))
            .route("/pricing/plans/:plan_id", get(pricing::get_plan))
            .route("/pricing/subscribe", post(pricing::subscribe));
    }

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_v1_routes)
        .layer(middleware::from_fn(identify_caller))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB, form values only
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
