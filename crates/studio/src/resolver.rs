//! Entitlement Resolver
//!
//! Pure filtering of the static catalogs by subscription level and mode.
//! The functions are total over the closed [`GenerationMode`] and
//! [`SubscriptionLevel`] enums; unknown strings are rejected earlier, when
//! they are parsed into those enums.

use melodia_shared::{GenerationMode, SubscriptionLevel};

use crate::catalog::{
    filter_options, Catalog, ChoiceOption, ModeSpec, ModelSpec, DURATIONS, STYLES,
};
use crate::error::{StudioError, StudioResult};

impl Catalog {
    /// Models that support `mode` and whose minimum level is at or below `level`
    pub fn models_for_mode(
        &self,
        mode: GenerationMode,
        level: SubscriptionLevel,
    ) -> Vec<&'static ModelSpec> {
        self.models()
            .iter()
            .filter(|model| model.supports(mode))
            .filter(|model| model.available_to(level))
            .collect()
    }

    /// Modes usable at `level`, in declaration order
    pub fn available_modes(&self, level: SubscriptionLevel) -> Vec<GenerationMode> {
        self.modes()
            .iter()
            .filter(|mode| level.at_least(mode.minimum_level))
            .map(|mode| mode.id)
            .collect()
    }

    pub fn mode_spec(&self, mode: GenerationMode) -> Option<&'static ModeSpec> {
        self.modes().iter().find(|spec| spec.id == mode)
    }

    pub fn model(&self, id: &str) -> Option<&'static ModelSpec> {
        self.models().iter().find(|model| model.id == id)
    }

    /// Fails with [`StudioError::ModeUnavailable`] unless `level` may use `mode`.
    /// A mode missing from the catalog is treated as unavailable.
    pub fn ensure_mode_available(
        &self,
        mode: GenerationMode,
        level: SubscriptionLevel,
    ) -> StudioResult<()> {
        let required = match self.mode_spec(mode) {
            Some(spec) if level.at_least(spec.minimum_level) => return Ok(()),
            Some(spec) => spec.minimum_level,
            None => SubscriptionLevel::Enterprise,
        };

        Err(StudioError::ModeUnavailable {
            mode,
            level,
            required,
        })
    }

    /// Fails with [`StudioError::ModelUnavailable`] unless `model_id` is among
    /// [`Catalog::models_for_mode`] for this mode and level
    pub fn ensure_model_available(
        &self,
        model_id: &str,
        mode: GenerationMode,
        level: SubscriptionLevel,
    ) -> StudioResult<&'static ModelSpec> {
        self.models_for_mode(mode, level)
            .into_iter()
            .find(|model| model.id == model_id)
            .ok_or_else(|| StudioError::ModelUnavailable {
                model: model_id.to_string(),
                mode,
                level,
            })
    }
}

/// [`Catalog::models_for_mode`] on the shipped catalog
pub fn models_for_mode(mode: GenerationMode, level: SubscriptionLevel) -> Vec<&'static ModelSpec> {
    Catalog::builtin().models_for_mode(mode, level)
}

/// [`Catalog::available_modes`] on the shipped catalog
pub fn available_modes(level: SubscriptionLevel) -> Vec<GenerationMode> {
    Catalog::builtin().available_modes(level)
}

/// Duration choices `level` may pick, in catalog order
pub fn durations_for_level(level: SubscriptionLevel) -> Vec<ChoiceOption> {
    filter_options(DURATIONS, level)
}

/// Style choices `level` may pick, in catalog order
pub fn styles_for_level(level: SubscriptionLevel) -> Vec<ChoiceOption> {
    filter_options(STYLES, level)
}
