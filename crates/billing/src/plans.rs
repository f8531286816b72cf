//! Pricing plan catalog and quotes

use melodia_shared::SubscriptionLevel;
use serde::{Serialize, Serializer};

use crate::error::{BillingError, BillingResult};

/// Discount applied to every paid plan, in percent
pub const PAID_PLAN_DISCOUNT_PERCENT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Outline,
    Default,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: &'static str,
    pub level: SubscriptionLevel,
    pub name: &'static str,
    #[serde(rename = "price", serialize_with = "serialize_price")]
    pub price_cents: u32,
    pub period: &'static str,
    pub description: &'static str,
    pub features_title: &'static str,
    pub features: &'static [&'static str],
    pub button_text: &'static str,
    pub button_variant: ButtonVariant,
    pub is_highlighted: bool,
    pub details: &'static str,
}

impl PricingPlan {
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Display price, e.g. `$9.99`
    pub fn price(&self) -> String {
        format_cents(self.price_cents)
    }
}

/// A plan with its current discount applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuote {
    #[serde(flatten)]
    pub plan: &'static PricingPlan,
    pub discount: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
}

pub static PLANS: &[PricingPlan] = &[
    PricingPlan {
        id: "free",
        level: SubscriptionLevel::Free,
        name: "Free",
        price_cents: 0,
        period: "forever",
        description: "For individuals getting started",
        features_title: "Basics",
        features: &[
            "2 music generations per day",
            "Basic music styles",
            "Standard audio quality",
            "Community templates",
        ],
        button_text: "Start for free",
        button_variant: ButtonVariant::Outline,
        is_highlighted: false,
        details: "The free plan never expires, but features and daily usage are limited.",
    },
    PricingPlan {
        id: "standard",
        level: SubscriptionLevel::Standard,
        name: "Standard",
        price_cents: 999,
        period: "per month",
        description: "For creators and small teams",
        features_title: "Everything in Free, plus",
        features: &[
            "Unlimited music generation",
            "Custom music parameters",
            "Usage statistics",
            "High quality audio",
            "Priority support",
        ],
        button_text: "Upgrade",
        button_variant: ButtonVariant::Default,
        is_highlighted: true,
        details: "Standard adds advanced editing and priority support to every basic feature.",
    },
    PricingPlan {
        id: "enterprise",
        level: SubscriptionLevel::Enterprise,
        name: "Enterprise",
        price_cents: 4999,
        period: "per month",
        description: "For studios and large organizations",
        features_title: "Enterprise features",
        features: &[
            "Unlimited generation and storage",
            "Enterprise-grade security",
            "Multi-track mixing",
            "Studio quality audio export",
            "Priority API access",
            "Dedicated account manager",
            "Team collaboration",
        ],
        button_text: "Upgrade",
        button_variant: ButtonVariant::Secondary,
        is_highlighted: false,
        details: "Enterprise covers team collaboration and organization-wide needs.",
    },
];

pub fn plans() -> &'static [PricingPlan] {
    PLANS
}

/// Look up a plan by id
pub fn find_plan(plan_id: &str) -> BillingResult<&'static PricingPlan> {
    let plan_id = plan_id.trim();
    if plan_id.is_empty() {
        return Err(BillingError::InvalidInput("plan id is required".to_string()));
    }

    PLANS
        .iter()
        .find(|plan| plan.id == plan_id)
        .ok_or_else(|| BillingError::NotFound(format!("pricing plan '{}'", plan_id)))
}

/// The plan for a subscription level
pub fn plan_for_level(level: SubscriptionLevel) -> &'static PricingPlan {
    PLANS
        .iter()
        .find(|plan| plan.level == level)
        .unwrap_or(&PLANS[0])
}

/// Quote a plan: paid plans carry the standing discount and the pre-discount price
pub fn quote(plan_id: &str) -> BillingResult<PlanQuote> {
    let plan = find_plan(plan_id)?;

    if plan.is_free() {
        return Ok(PlanQuote {
            plan,
            discount: 0,
            original_price: None,
        });
    }

    // price / 0.85, rounded to the cent
    let divisor = 100 - PAID_PLAN_DISCOUNT_PERCENT;
    let original = (plan.price_cents * 100 + divisor / 2) / divisor;

    Ok(PlanQuote {
        plan,
        discount: PAID_PLAN_DISCOUNT_PERCENT,
        original_price: Some(format_cents(original)),
    })
}

fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn serialize_price<S: Serializer>(cents: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_cents(*cents))
}
