//! Payment gateway
//!
//! Melodia never talks to a real processor. [`SimulatedGateway`] approves a
//! configurable share of charges so the decline path stays exercised.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::plans::PricingPlan;

/// Default share of simulated charges that succeed
pub const DEFAULT_SUCCESS_RATE: f64 = 0.95;

/// Payment details submitted with a subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cardholder_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Succeeded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Succeeded => "succeeded",
        }
    }
}

/// Something that can charge a plan's price
pub trait PaymentGateway: Send + Sync {
    fn charge(&self, plan: &PricingPlan, payment: &PaymentDetails) -> BillingResult<PaymentStatus>;
}

/// Gateway that succeeds with a fixed probability
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    success_rate: f64,
}

impl SimulatedGateway {
    /// `success_rate` is clamped into `0.0..=1.0`
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            DEFAULT_SUCCESS_RATE
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self { success_rate }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_RATE)
    }
}

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, plan: &PricingPlan, _payment: &PaymentDetails) -> BillingResult<PaymentStatus> {
        if plan.is_free() {
            return Ok(PaymentStatus::Succeeded);
        }

        if rand::thread_rng().gen_bool(self.success_rate) {
            Ok(PaymentStatus::Succeeded)
        } else {
            tracing::warn!(plan_id = plan.id, price = %plan.price(), "simulated payment declined");
            Err(BillingError::PaymentDeclined(
                "the payment could not be processed, please retry or contact support".to_string(),
            ))
        }
    }
}
