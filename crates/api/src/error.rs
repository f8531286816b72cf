//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use melodia_billing::BillingError;
use melodia_shared::MelodiaError;
use melodia_studio::{StudioError, ValidationReport};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Validation errors
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Validation failed")]
    Validation(ValidationReport),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Entitlement errors
    #[error("Subscription required: {0}")]
    SubscriptionRequired(String),
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("Payment required: {0}")]
    PaymentRequired(String),

    // Internal errors
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Validation
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Validation(report) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                report
                    .first()
                    .map(|error| error.message.clone())
                    .unwrap_or_else(|| self.to_string()),
            ),

            // Resources
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),

            // Entitlements
            ApiError::SubscriptionRequired(msg) => (StatusCode::PAYMENT_REQUIRED, "SUBSCRIPTION_REQUIRED", msg.clone()),
            ApiError::QuotaExceeded(msg) => (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED", msg.clone()),
            ApiError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REQUIRED", msg.clone()),

            // Internal
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", self.to_string()),
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let ApiError::Validation(report) = &self {
            error["fields"] = json!(report.errors);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<MelodiaError> for ApiError {
    fn from(err: MelodiaError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        match err {
            StudioError::InvalidArgument(err) => err.into(),
            StudioError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            StudioError::ModeUnavailable { .. } | StudioError::ModelUnavailable { .. } => {
                ApiError::SubscriptionRequired(err.to_string())
            }
            StudioError::OptionsResolution { .. }
            | StudioError::Io(_)
            | StudioError::CorruptHistory(_) => {
                tracing::error!("Studio error: {}", err);
                ApiError::Internal
            }
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::NotFound(msg) => ApiError::NotFound(msg),
            BillingError::InvalidInput(msg) => ApiError::BadRequest(msg),
            BillingError::PaymentDeclined(msg) => ApiError::PaymentRequired(msg),
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
