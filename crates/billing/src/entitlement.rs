//! Plan permissions
//!
//! Answers "what may this user do right now?" for everything outside the
//! studio catalog: daily generation quota and plan-level feature flags.
//! Model, mode and option gating lives with the catalog itself.

use melodia_shared::SubscriptionLevel;
use serde::{Deserialize, Serialize};

/// Daily generation quota for the free plan
pub const FREE_DAILY_GENERATIONS: u32 = 2;

/// Feature flags and limits for a subscription level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPermissions {
    pub level: SubscriptionLevel,
    /// Generations per UTC day; `None` is unlimited
    pub daily_limit: Option<u32>,
    pub custom_parameters: bool,
    pub high_quality_audio: bool,
    pub priority_support: bool,
    pub team_features: bool,
}

impl PlanPermissions {
    /// Get permissions for a level
    pub fn for_level(level: SubscriptionLevel) -> Self {
        match level {
            SubscriptionLevel::Free => Self {
                level,
                daily_limit: Some(FREE_DAILY_GENERATIONS),
                custom_parameters: false,
                high_quality_audio: false,
                priority_support: false,
                team_features: false,
            },
            SubscriptionLevel::Standard => Self {
                level,
                daily_limit: None,
                custom_parameters: true,
                high_quality_audio: true,
                priority_support: true,
                team_features: false,
            },
            SubscriptionLevel::Enterprise => Self {
                level,
                daily_limit: None,
                custom_parameters: true,
                high_quality_audio: true,
                priority_support: true,
                team_features: true,
            },
        }
    }

    /// Whether one more generation fits in today's quota
    pub fn allows_generation(&self, generated_today: usize) -> bool {
        match self.daily_limit {
            Some(limit) => generated_today < limit as usize,
            None => true,
        }
    }
}
