//! Studio error types

use melodia_shared::{GenerationMode, MelodiaError, SubscriptionLevel};
use thiserror::Error;

/// Errors raised by catalog resolution, request assembly and track history
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    InvalidArgument(#[from] MelodiaError),

    #[error("Options for parameter '{parameter}' could not be resolved: {reason}")]
    OptionsResolution {
        parameter: &'static str,
        reason: String,
    },

    #[error("Mode '{mode}' requires a {required} subscription (current: {level})")]
    ModeUnavailable {
        mode: GenerationMode,
        level: SubscriptionLevel,
        required: SubscriptionLevel,
    },

    #[error("Model '{model}' is not available for mode '{mode}' at level '{level}'")]
    ModelUnavailable {
        model: String,
        mode: GenerationMode,
        level: SubscriptionLevel,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is corrupt: {0}")]
    CorruptHistory(String),
}

pub type StudioResult<T> = Result<T, StudioError>;
