//! Request Validation
//!
//! Checks submitted values against the resolved parameter list. Failures are
//! returned as data ([`ValidationReport`]), one message per field, so the
//! caller can show them and let the user resubmit.
//!
//! Only parameters present in the resolved list are checked; a field the
//! caller never saw can never block a submission.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parameters::ResolvedParameter;

/// Submitted form values keyed by parameter id
pub type ParameterValues = BTreeMap<String, Value>;

/// The text form of a submitted value; `None` for null or missing
pub fn value_text(values: &ParameterValues, id: &str) -> Option<String> {
    match values.get(id)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// A user-facing error for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error to show first (display order)
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }
}

/// Validate `values` against the parameters visible for the current (mode, level)
pub fn validate(parameters: &[ResolvedParameter], values: &ParameterValues) -> ValidationReport {
    let errors = parameters
        .iter()
        .filter_map(|param| {
            check_field(param, value_text(values, param.id).as_deref()).map(|message| FieldError {
                field: param.id.to_string(),
                message,
            })
        })
        .collect();

    ValidationReport { errors }
}

fn check_field(param: &ResolvedParameter, value: Option<&str>) -> Option<String> {
    // Checked as trimmed, the same text the assembler submits.
    let value = match value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ if param.required => return Some(format!("{} is required", param.label)),
        _ => return None,
    };

    if let Some(rule) = &param.validation {
        let length = value.chars().count();
        let rule_message = |fallback: String| rule.message.map(str::to_string).unwrap_or(fallback);

        if let Some(min) = rule.min_length {
            if length < min {
                return Some(rule_message(format!(
                    "{} must be at least {} characters",
                    param.label, min
                )));
            }
        }

        if let Some(max) = rule.max_length {
            if length > max {
                return Some(rule_message(format!(
                    "{} must be at most {} characters",
                    param.label, max
                )));
            }
        }

        if let Some(pattern) = rule.pattern {
            match Regex::new(pattern) {
                Ok(regex) if regex.is_match(value) => {}
                Ok(_) => {
                    return Some(rule_message(format!("{} has an invalid format", param.label)))
                }
                Err(err) => {
                    tracing::error!(
                        parameter = param.id,
                        pattern = pattern,
                        error = %err,
                        "invalid validation pattern"
                    );
                    return Some(rule_message(format!("{} could not be validated", param.label)));
                }
            }
        }
    }

    if !param.offers(value) {
        return Some(format!(
            "{} option '{}' is not available on your plan",
            param.label, value
        ));
    }

    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{param, Catalog, MODES, ParameterConfig, ParameterKind, ValidationRule};
    use crate::parameters::visible_parameters;
    use melodia_shared::{GenerationMode, SubscriptionLevel};
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> ParameterValues {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn inspiration_free_values() -> ParameterValues {
        values(&[
            (param::MODEL, json!("Chirp v4.0")),
            (param::NAME, json!("Morning run")),
            (param::DESCRIPTION, json!("Upbeat synths for a sunrise jog")),
            (param::STYLE, json!("pop")),
            (param::MOOD, json!("happy")),
            (param::VOCAL_TYPE, json!("random")),
            (param::DURATION, json!(15)),
            (param::TEMPO, json!("medium")),
        ])
    }

    #[test]
    fn test_valid_submission_passes() {
        let params =
            visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free).unwrap();
        let report = validate(&params, &inspiration_free_values());
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn test_blank_required_field_is_reported() {
        let params =
            visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free).unwrap();
        let mut submitted = inspiration_free_values();
        submitted.insert(param::NAME.to_string(), json!("   "));
        submitted.remove(param::MOOD);

        let report = validate(&params, &submitted);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.first().unwrap().field, param::NAME);
        assert_eq!(report.error_for(param::MOOD).unwrap().message, "Mood is required");
    }

    #[test]
    fn test_min_length_uses_rule_message() {
        let params =
            visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free).unwrap();
        let mut submitted = inspiration_free_values();
        submitted.insert(param::DESCRIPTION.to_string(), json!("abc"));

        let report = validate(&params, &submitted);
        assert_eq!(
            report.error_for(param::DESCRIPTION).unwrap().message,
            "Please describe the music in more detail (at least 5 characters)"
        );
    }

    #[test]
    fn test_padding_does_not_count_toward_length() {
        let params =
            visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free).unwrap();
        let mut submitted = inspiration_free_values();
        submitted.insert(param::DESCRIPTION.to_string(), json!("   ab   "));

        let report = validate(&params, &submitted);
        assert!(report.error_for(param::DESCRIPTION).is_some());

        submitted.insert(param::DESCRIPTION.to_string(), json!("  lofi beats  "));
        submitted.insert(param::STYLE.to_string(), json!(" pop "));
        assert!(validate(&params, &submitted).is_valid());
    }

    #[test]
    fn test_min_length_generic_message() {
        const PARAMS: &[ParameterConfig] = &[ParameterConfig::new(
            "title",
            "Title",
            ParameterKind::String,
            1,
        )
        .validation(ValidationRule::new().min_length(3))];
        static CATALOG: Catalog = Catalog::new(MODES, &[], PARAMS);
        let params = CATALOG
            .visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free)
            .unwrap();

        let report = validate(&params, &values(&[("title", json!("ab"))]));
        assert_eq!(
            report.first().unwrap().message,
            "Title must be at least 3 characters"
        );
        // Optional and empty: nothing to check.
        assert!(validate(&params, &ParameterValues::new()).is_valid());
    }

    #[test]
    fn test_max_length_and_pattern() {
        const PARAMS: &[ParameterConfig] = &[ParameterConfig::new(
            "isrc",
            "ISRC",
            ParameterKind::String,
            1,
        )
        .required()
        .validation(
            ValidationRule::new()
                .max_length(12)
                .pattern("^[A-Z]{2}[A-Z0-9]{3}[0-9]{7}$"),
        )];
        static CATALOG: Catalog = Catalog::new(MODES, &[], PARAMS);
        let params = CATALOG
            .visible_parameters(GenerationMode::Custom, SubscriptionLevel::Standard)
            .unwrap();

        assert!(validate(&params, &values(&[("isrc", json!("USRC17607839"))])).is_valid());
        assert_eq!(
            validate(&params, &values(&[("isrc", json!("USRC176078390"))]))
                .first()
                .unwrap()
                .message,
            "ISRC must be at most 12 characters"
        );
        assert_eq!(
            validate(&params, &values(&[("isrc", json!("usrc17607839"))]))
                .first()
                .unwrap()
                .message,
            "ISRC has an invalid format"
        );
    }

    #[test]
    fn test_paid_option_is_rejected_for_free_level() {
        let params =
            visible_parameters(GenerationMode::Inspiration, SubscriptionLevel::Free).unwrap();
        let mut submitted = inspiration_free_values();
        submitted.insert(param::DURATION.to_string(), json!("180"));
        submitted.insert(param::MODEL.to_string(), json!("Chirp v5.5"));

        let report = validate(&params, &submitted);
        assert!(report.error_for(param::DURATION).is_some());
        assert!(report.error_for(param::MODEL).is_some());
    }

    #[test]
    fn test_hidden_parameters_are_never_validated() {
        // Custom mode hides the description; leaving it out must not block submission.
        let params =
            visible_parameters(GenerationMode::Custom, SubscriptionLevel::Standard).unwrap();
        let mut submitted = inspiration_free_values();
        submitted.remove(param::DESCRIPTION);
        submitted.insert(param::LYRICS.to_string(), json!("La la la, sunrise"));

        let report = validate(&params, &submitted);
        assert!(report.is_valid(), "{:?}", report);
        assert!(report.error_for(param::DESCRIPTION).is_none());
    }

    #[test]
    fn test_value_text_normalizes_numbers() {
        let submitted = values(&[("duration", json!(30)), ("empty", Value::Null)]);
        assert_eq!(value_text(&submitted, "duration").as_deref(), Some("30"));
        assert_eq!(value_text(&submitted, "empty"), None);
        assert_eq!(value_text(&submitted, "missing"), None);
    }
}
