//! Parameter Visibility Engine
//!
//! Computes, for a (mode, level) pair, the ordered list of form parameters a
//! caller should see, with every option list already resolved and filtered.
//!
//! ## Resolution steps
//!
//! 1. Drop parameters whose `minimum_level` gate is above the caller's level
//! 2. Drop parameters whose `visibility` condition does not admit (mode, level)
//! 3. Resolve options through [`OptionSource::resolve`](crate::catalog::OptionSource::resolve),
//!    which applies the same allow-list filter to fixed and computed lists
//! 4. Stable sort by `order`; equal orders keep declaration order
//!
//! The engine is pure: no I/O, no clock, no form state. Whether the mode
//! itself is usable at the level is answered by
//! [`Catalog::available_modes`], not here.

use melodia_shared::{GenerationMode, SubscriptionLevel};
use serde::Serialize;

use crate::catalog::{
    Catalog, ChoiceOption, ParameterConfig, ParameterKind, ValidationRule, VisibilityCondition,
};
use crate::error::{StudioError, StudioResult};

/// A parameter as shown to a caller at a given (mode, level)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameter {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
    pub default_value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub request_key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<SubscriptionLevel>,
    /// `None` for free-text parameters; may be empty for a select whose every
    /// option is gated above the caller's level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    pub order: u32,
}

impl ResolvedParameter {
    fn resolve(param: &ParameterConfig, level: SubscriptionLevel) -> StudioResult<Self> {
        let options = param
            .options
            .map(|source| source.resolve(level))
            .transpose()
            .map_err(|err| StudioError::OptionsResolution {
                parameter: param.id,
                reason: format!("{:#}", err),
            })?;

        Ok(Self {
            id: param.id,
            label: param.label,
            kind: param.kind,
            required: param.required,
            default_value: param.default_value,
            placeholder: param.placeholder,
            description: param.description,
            request_key: param.request_key,
            validation: param.validation,
            visibility: param.visibility,
            minimum_level: param.minimum_level,
            options,
            order: param.order,
        })
    }

    /// Whether `value` is one of the resolved options.
    /// Free-text parameters accept any value.
    pub fn offers(&self, value: &str) -> bool {
        self.options
            .as_ref()
            .map_or(true, |options| options.iter().any(|option| option.value == value))
    }
}

impl Catalog {
    /// The ordered, entitlement-filtered parameter list for `mode` at `level`
    pub fn visible_parameters(
        &self,
        mode: GenerationMode,
        level: SubscriptionLevel,
    ) -> StudioResult<Vec<ResolvedParameter>> {
        let mut resolved = self
            .parameters()
            .iter()
            .filter(|param| param.is_visible(mode, level))
            .map(|param| ResolvedParameter::resolve(param, level))
            .collect::<StudioResult<Vec<_>>>()?;

        // `sort_by_key` is stable: ties keep declaration order.
        resolved.sort_by_key(|param| param.order);

        tracing::debug!(
            mode = %mode,
            level = %level,
            parameters = resolved.len(),
            "resolved visible parameters"
        );

        Ok(resolved)
    }
}

/// [`Catalog::visible_parameters`] on the shipped catalog
pub fn visible_parameters(
    mode: GenerationMode,
    level: SubscriptionLevel,
) -> StudioResult<Vec<ResolvedParameter>> {
    Catalog::builtin().visible_parameters(mode, level)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{param, ModeSpec, OptionSource, MODES};
    use GenerationMode::{Custom, Inspiration, Instrumental};
    use SubscriptionLevel::{Enterprise, Free, Standard};

    fn ids(params: &[ResolvedParameter]) -> Vec<&'static str> {
        params.iter().map(|p| p.id).collect()
    }

    fn option_values(params: &[ResolvedParameter], id: &str) -> Vec<&'static str> {
        params
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.options.as_ref())
            .map(|options| options.iter().map(|o| o.value).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_inspiration_free_parameters() {
        let params = visible_parameters(Inspiration, Free).unwrap();
        assert_eq!(
            ids(&params),
            vec![
                param::MODEL,
                param::NAME,
                param::DESCRIPTION,
                param::STYLE,
                param::MOOD,
                param::VOCAL_TYPE,
                param::DURATION,
                param::TEMPO,
            ]
        );
        assert_eq!(option_values(&params, param::MODEL), vec!["Chirp v4.0"]);
        assert_eq!(option_values(&params, param::DURATION), vec!["15"]);
        assert_eq!(option_values(&params, param::STYLE), vec!["pop", "electronic"]);
    }

    #[test]
    fn test_custom_standard_shows_lyrics_not_description() {
        let params = visible_parameters(Custom, Standard).unwrap();
        let ids = ids(&params);
        assert!(ids.contains(&param::LYRICS));
        assert!(!ids.contains(&param::DESCRIPTION));
        assert!(ids.contains(&param::VOCAL_TYPE));
    }

    #[test]
    fn test_instrumental_hides_vocal_type() {
        for level in SubscriptionLevel::ALL {
            let params = visible_parameters(Instrumental, level).unwrap();
            assert!(!ids(&params).contains(&param::VOCAL_TYPE));
            assert!(ids(&params).contains(&param::DESCRIPTION));
        }
        // The mode itself is gated separately.
        assert!(!Catalog::builtin().available_modes(Free).contains(&Instrumental));
    }

    #[test]
    fn test_sorted_by_order_and_deterministic() {
        for mode in GenerationMode::ALL {
            for level in SubscriptionLevel::ALL {
                let first = visible_parameters(mode, level).unwrap();
                let second = visible_parameters(mode, level).unwrap();
                assert_eq!(first, second);
                assert!(first.windows(2).all(|w| w[0].order <= w[1].order));
            }
        }
    }

    #[test]
    fn test_no_option_escapes_allow_list() {
        for mode in GenerationMode::ALL {
            for level in SubscriptionLevel::ALL {
                for param in visible_parameters(mode, level).unwrap() {
                    for option in param.options.unwrap_or_default() {
                        assert!(
                            option.visible_to(level),
                            "{} option {} leaked to {}",
                            param.id,
                            option.value,
                            level
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_enterprise_sees_full_option_sets() {
        let params = visible_parameters(Inspiration, Enterprise).unwrap();
        assert_eq!(option_values(&params, param::MODEL).len(), 4);
        assert_eq!(
            option_values(&params, param::DURATION),
            vec!["15", "30", "60", "120", "180"]
        );
        assert_eq!(option_values(&params, param::STYLE).len(), 7);
    }

    // =========================================================================
    // Custom catalogs
    // =========================================================================

    const TIED: &[ParameterConfig] = &[
        ParameterConfig::new("third", "Third", ParameterKind::String, 2),
        ParameterConfig::new("first", "First", ParameterKind::String, 1),
        ParameterConfig::new("second", "Second", ParameterKind::String, 1),
        ParameterConfig::new("gated", "Gated", ParameterKind::String, 0)
            .minimum_level(Standard),
    ];

    #[test]
    fn test_ties_keep_declaration_order() {
        static CATALOG: Catalog = Catalog::new(MODES, &[], TIED);
        let params = CATALOG.visible_parameters(Inspiration, Free).unwrap();
        assert_eq!(ids(&params), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_minimum_level_gate_never_leaks() {
        static CATALOG: Catalog = Catalog::new(MODES, &[], TIED);
        for mode in GenerationMode::ALL {
            for level in SubscriptionLevel::ALL {
                let params = CATALOG.visible_parameters(mode, level).unwrap();
                for param in &params {
                    if let Some(minimum) = param.minimum_level {
                        assert!(level.at_least(minimum));
                    }
                }
                assert_eq!(ids(&params).contains(&"gated"), level >= Standard);
            }
        }
    }

    fn failing_options(_: SubscriptionLevel) -> anyhow::Result<Vec<ChoiceOption>> {
        anyhow::bail!("pricing table unavailable")
    }

    fn unfiltered_options(_: SubscriptionLevel) -> anyhow::Result<Vec<ChoiceOption>> {
        Ok(vec![
            ChoiceOption::new("basic", "Basic"),
            ChoiceOption::new("studio", "Studio").allowed(&[Enterprise]),
        ])
    }

    #[test]
    fn test_failing_option_source_propagates() {
        const PARAMS: &[ParameterConfig] = &[
            ParameterConfig::new("ok", "Ok", ParameterKind::String, 1),
            ParameterConfig::new("broken", "Broken", ParameterKind::Select, 2)
                .required()
                .options(OptionSource::Computed(failing_options)),
        ];
        static CATALOG: Catalog = Catalog::new(MODES, &[], PARAMS);

        let err = CATALOG.visible_parameters(Inspiration, Free).unwrap_err();
        match err {
            StudioError::OptionsResolution { parameter, reason } => {
                assert_eq!(parameter, "broken");
                assert!(reason.contains("pricing table unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_computed_options_are_filtered_like_fixed_ones() {
        const PARAMS: &[ParameterConfig] = &[ParameterConfig::new(
            "quality",
            "Quality",
            ParameterKind::Select,
            1,
        )
        .options(OptionSource::Computed(unfiltered_options))];
        static CATALOG: Catalog = Catalog::new(MODES, &[], PARAMS);

        let free = CATALOG.visible_parameters(Inspiration, Free).unwrap();
        assert_eq!(option_values(&free, "quality"), vec!["basic"]);

        let enterprise = CATALOG.visible_parameters(Inspiration, Enterprise).unwrap();
        assert_eq!(option_values(&enterprise, "quality"), vec!["basic", "studio"]);
    }

    #[test]
    fn test_mode_spec_lookup_matches_available_modes() {
        let catalog = Catalog::builtin();
        for level in SubscriptionLevel::ALL {
            for mode in catalog.available_modes(level) {
                let spec: &ModeSpec = catalog.mode_spec(mode).unwrap();
                assert!(level.at_least(spec.minimum_level));
            }
        }
    }

    #[test]
    fn test_offers_checks_resolved_options() {
        let params = visible_parameters(Inspiration, Free).unwrap();
        let duration = params.iter().find(|p| p.id == param::DURATION).unwrap();
        assert!(duration.offers("15"));
        assert!(!duration.offers("180"));

        let name = params.iter().find(|p| p.id == param::NAME).unwrap();
        assert!(name.offers("anything at all"));
    }
}
