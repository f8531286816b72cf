//! Melodia Shared Types and Utilities
//!
//! This crate contains the closed enumerations and errors shared across the
//! Melodia workspace.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
