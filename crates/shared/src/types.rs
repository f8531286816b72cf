//! Common types used across Melodia

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MelodiaError;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Generated track ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TrackId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Subscription level gating feature visibility.
///
/// Totally ordered `Free < Standard < Enterprise`; callers compare levels
/// with the ordering operators or [`SubscriptionLevel::at_least`], never by
/// a numeric rank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    #[default]
    Free,
    Standard,
    Enterprise,
}

impl SubscriptionLevel {
    /// Every level, lowest first
    pub const ALL: [SubscriptionLevel; 3] = [Self::Free, Self::Standard, Self::Enterprise];

    /// Whether this level satisfies a minimum-level gate
    pub fn at_least(self, minimum: SubscriptionLevel) -> bool {
        self >= minimum
    }

    /// This level and every level above it.
    /// Used to express "minimum level" as an allow-list.
    pub const fn and_above(self) -> &'static [SubscriptionLevel] {
        match self {
            Self::Free => &Self::ALL,
            Self::Standard => &[Self::Standard, Self::Enterprise],
            Self::Enterprise => &[Self::Enterprise],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Standard => "standard",
            Self::Enterprise => "enterprise",
        }
    }

    /// Human-facing plan name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Standard => "Standard",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for SubscriptionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionLevel {
    type Err = MelodiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "standard" => Ok(Self::Standard),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(MelodiaError::invalid("subscription level", s)),
        }
    }
}

/// Music creation workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Generate from a free-form description
    Inspiration,
    /// Generate from user-supplied lyrics
    Custom,
    /// Generate without vocals
    Instrumental,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 3] = [Self::Inspiration, Self::Custom, Self::Instrumental];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inspiration => "inspiration",
            Self::Custom => "custom",
            Self::Instrumental => "instrumental",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = MelodiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inspiration" => Ok(Self::Inspiration),
            "custom" => Ok(Self::Custom),
            "instrumental" => Ok(Self::Instrumental),
            _ => Err(MelodiaError::invalid("generation mode", s)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
