//! Melodia Studio
//!
//! The generation side of Melodia: static catalogs, the entitlement resolver,
//! the parameter visibility engine, request validation and assembly, the mock
//! generator and the track history.
//!
//! Everything up to [`request`] is synchronous and pure; only [`history`] and
//! [`generator`] touch the filesystem or the clock.

pub mod catalog;
pub mod error;
pub mod generator;
pub mod history;
pub mod parameters;
pub mod request;
pub mod resolver;
pub mod validation;

pub use catalog::{Catalog, ChoiceOption, ModeSpec, ModelSpec, OptionSource, ParameterConfig};
pub use error::{StudioError, StudioResult};
pub use generator::{GenerationService, OwnerSlot};
pub use history::{HistoryStore, Track};
pub use parameters::{visible_parameters, ResolvedParameter};
pub use request::{GenerationRequest, RequestAssembler};
pub use resolver::{available_modes, durations_for_level, models_for_mode, styles_for_level};
pub use validation::{validate, FieldError, ParameterValues, ValidationReport};
