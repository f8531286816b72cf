//! Error types for Melodia

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MelodiaError {
    /// An unrecognized subscription level or generation mode reached a resolver.
    /// Never defaulted: a wrong entitlement would expose paid features.
    #[error("Invalid {kind}: {value:?}")]
    InvalidArgument { kind: &'static str, value: String },
}

impl MelodiaError {
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            value: value.into(),
        }
    }
}
