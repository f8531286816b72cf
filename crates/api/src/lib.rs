//! Melodia API Library
//!
//! This crate contains the HTTP server components for Melodia.

pub mod caller;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use caller::Caller;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
