//! Request Assembler
//!
//! Maps validated parameter values onto the fixed-key generation request.
//! Keys whose parameter is not in the resolved list get a safe default
//! instead of whatever the client happened to send.

use melodia_shared::{GenerationMode, SubscriptionLevel};
use serde::{Deserialize, Serialize};

use crate::catalog::{param, Catalog};
use crate::error::{StudioError, StudioResult};
use crate::parameters::ResolvedParameter;
use crate::validation::{value_text, ParameterValues};

/// Vocal type submitted when the vocal parameter is hidden
pub const NO_VOCALS: &str = "none";

/// Outbound payload for the generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    pub style: String,
    pub mood: String,
    /// Seconds
    pub duration: u32,
    pub tempo: String,
    pub vocal_type: String,
    pub model_id: String,
}

/// Builds [`GenerationRequest`]s for one catalog
pub struct RequestAssembler<'a> {
    catalog: &'a Catalog,
}

impl<'a> RequestAssembler<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Assemble a request from values already accepted by
    /// [`validate`](crate::validation::validate) for the same `parameters`.
    pub fn assemble(
        &self,
        mode: GenerationMode,
        level: SubscriptionLevel,
        parameters: &[ResolvedParameter],
        values: &ParameterValues,
    ) -> StudioResult<GenerationRequest> {
        let field = |id: &str| self.field(parameters, values, id);

        let lyrics = is_visible(parameters, param::LYRICS)
            .then(|| field(param::LYRICS))
            .filter(|text| !text.is_empty());

        let description = if is_visible(parameters, param::DESCRIPTION) {
            field(param::DESCRIPTION)
        } else {
            lyrics.clone().unwrap_or_default()
        };

        let vocal_type = if is_visible(parameters, param::VOCAL_TYPE) {
            field(param::VOCAL_TYPE)
        } else {
            NO_VOCALS.to_string()
        };

        let duration_text = field(param::DURATION);
        let duration = duration_text.trim().parse::<u32>().map_err(|_| {
            StudioError::InvalidRequest(format!(
                "duration '{}' is not a number of seconds",
                duration_text
            ))
        })?;

        let model_id = field(param::MODEL);
        self.catalog.ensure_model_available(&model_id, mode, level)?;

        Ok(GenerationRequest {
            mode,
            name: field(param::NAME),
            description,
            lyrics,
            style: field(param::STYLE),
            mood: field(param::MOOD),
            duration,
            tempo: field(param::TEMPO),
            vocal_type,
            model_id,
        })
    }

    /// The submitted value when `id` is visible and non-blank, otherwise the
    /// declared default
    fn field(
        &self,
        parameters: &[ResolvedParameter],
        values: &ParameterValues,
        id: &str,
    ) -> String {
        let submitted = is_visible(parameters, id)
            .then(|| value_text(values, id))
            .flatten()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        submitted.unwrap_or_else(|| {
            self.catalog
                .parameter(id)
                .map(|param| param.default_value.to_string())
                .unwrap_or_default()
        })
    }
}

fn is_visible(parameters: &[ResolvedParameter], id: &str) -> bool {
    parameters.iter().any(|param| param.id == id)
}
