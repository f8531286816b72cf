//! Entitlement properties checked over every (mode, level) pair of the
//! shipped catalog

#![allow(clippy::unwrap_used)]

use melodia_shared::{GenerationMode, MelodiaError, SubscriptionLevel};
use melodia_studio::catalog::{param, DURATIONS};
use melodia_studio::{
    available_modes, durations_for_level, models_for_mode, visible_parameters, Catalog,
};

fn pairs() -> impl Iterator<Item = (GenerationMode, SubscriptionLevel)> {
    GenerationMode::ALL
        .into_iter()
        .flat_map(|mode| SubscriptionLevel::ALL.into_iter().map(move |level| (mode, level)))
}

// ============================================================================
// Ordering & Determinism
// ============================================================================

#[test]
fn test_parameters_sorted_and_deterministic() {
    for (mode, level) in pairs() {
        let first = visible_parameters(mode, level).unwrap();
        let second = visible_parameters(mode, level).unwrap();
        assert_eq!(first, second, "{mode}/{level}");

        let orders: Vec<_> = first.iter().map(|p| p.order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted, "{mode}/{level}");
    }
}

// ============================================================================
// Monotonic Widening
// ============================================================================

#[test]
fn test_modes_widen_with_level() {
    let free = available_modes(SubscriptionLevel::Free);
    let standard = available_modes(SubscriptionLevel::Standard);
    let enterprise = available_modes(SubscriptionLevel::Enterprise);

    assert!(free.iter().all(|mode| standard.contains(mode)));
    assert!(standard.iter().all(|mode| enterprise.contains(mode)));
}

#[test]
fn test_models_widen_with_level() {
    for mode in GenerationMode::ALL {
        let ids = |level| -> Vec<&str> {
            models_for_mode(mode, level).iter().map(|m| m.id).collect()
        };
        let free = ids(SubscriptionLevel::Free);
        let standard = ids(SubscriptionLevel::Standard);
        let enterprise = ids(SubscriptionLevel::Enterprise);

        assert!(free.iter().all(|id| standard.contains(id)), "{mode}");
        assert!(standard.iter().all(|id| enterprise.contains(id)), "{mode}");
    }
}

// ============================================================================
// Entitlement Gate
// ============================================================================

#[test]
fn test_nothing_above_level_leaks() {
    for (mode, level) in pairs() {
        for param in visible_parameters(mode, level).unwrap() {
            if let Some(minimum) = param.minimum_level {
                assert!(level >= minimum, "{} leaked to {level}", param.id);
            }

            for option in param.options.iter().flatten() {
                assert!(
                    option.visible_to(level),
                    "{}:{} leaked to {level}",
                    param.id,
                    option.value
                );
            }
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_instrumental_is_not_available_to_free() {
    assert!(!available_modes(SubscriptionLevel::Free).contains(&GenerationMode::Instrumental));

    let params =
        visible_parameters(GenerationMode::Instrumental, SubscriptionLevel::Free).unwrap();
    assert!(params.iter().all(|p| p.id != param::VOCAL_TYPE));
}

#[test]
fn test_free_inspiration_models_are_the_free_ones() {
    let expected: Vec<_> = Catalog::builtin()
        .models()
        .iter()
        .filter(|m| m.minimum_level == SubscriptionLevel::Free)
        .filter(|m| m.supports(GenerationMode::Inspiration))
        .map(|m| m.id)
        .collect();

    let actual: Vec<_> = models_for_mode(GenerationMode::Inspiration, SubscriptionLevel::Free)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_custom_standard_shows_lyrics_not_description() {
    let ids: Vec<_> = visible_parameters(GenerationMode::Custom, SubscriptionLevel::Standard)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert!(ids.contains(&param::LYRICS));
    assert!(!ids.contains(&param::DESCRIPTION));
}

#[test]
fn test_duration_lists() {
    for option in durations_for_level(SubscriptionLevel::Free) {
        assert!(option.visible_to(SubscriptionLevel::Free));
    }
    assert_eq!(
        durations_for_level(SubscriptionLevel::Enterprise),
        DURATIONS.to_vec()
    );
}

#[test]
fn test_unknown_level_string_is_rejected() {
    let err = "platinum".parse::<SubscriptionLevel>().unwrap_err();
    assert!(matches!(err, MelodiaError::InvalidArgument { .. }));
    assert!("".parse::<SubscriptionLevel>().is_err());
}
