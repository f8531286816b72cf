//! Subscription ledger and service
//!
//! The ledger is the source of every user's current level. It lives in
//! memory; a restart returns everyone to the free plan.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use melodia_shared::SubscriptionLevel;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entitlement::PlanPermissions;
use crate::error::BillingResult;
use crate::payment::{PaymentDetails, PaymentGateway};
use crate::plans::{find_plan, plan_for_level, PricingPlan};

/// Days between billing dates
pub const BILLING_PERIOD_DAYS: i64 = 30;

/// Subscription id reported for users who never subscribed
pub const FREE_SUBSCRIPTION_ID: &str = "sub_free";

const DEFAULT_CUSTOMER_EMAIL: &str = "user@example.com";
const SUBSCRIPTION_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUBSCRIPTION_ID_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    pub plan: SubscriptionLevel,
    pub subscription_id: String,
    pub next_billing_date: DateTime<Utc>,
    pub is_active: bool,
}

impl UserSubscription {
    /// The record every unknown user reads as
    pub fn free(now: DateTime<Utc>) -> Self {
        Self {
            plan: SubscriptionLevel::Free,
            subscription_id: FREE_SUBSCRIPTION_ID.to_string(),
            next_billing_date: now + Duration::days(BILLING_PERIOD_DAYS),
            is_active: true,
        }
    }
}

/// In-memory map of user id to subscription
#[derive(Debug, Default)]
pub struct SubscriptionLedger {
    entries: RwLock<HashMap<String, UserSubscription>>,
}

impl SubscriptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: &str) -> UserSubscription {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
            .unwrap_or_else(|| UserSubscription::free(Utc::now()))
    }

    /// The level `user` is entitled to; inactive subscriptions count as free
    pub fn level(&self, user: &str) -> SubscriptionLevel {
        let subscription = self.get(user);
        if subscription.is_active {
            subscription.plan
        } else {
            SubscriptionLevel::Free
        }
    }

    pub fn record(&self, user: &str, subscription: UserSubscription) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.to_string(), subscription);
    }

    /// Forget `user`'s subscription. Returns whether one was recorded.
    pub fn clear(&self, user: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user)
            .is_some()
    }
}

/// Returned after a successful subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfirmation {
    pub subscription_id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub next_billing_date: DateTime<Utc>,
    pub payment_status: String,
    pub customer_email: String,
    pub renewal_status: String,
    pub timestamp: DateTime<Utc>,
}

/// A user's subscription together with what it unlocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub subscription: UserSubscription,
    pub plan: &'static PricingPlan,
    pub permissions: PlanPermissions,
}

pub struct SubscriptionService {
    ledger: Arc<SubscriptionLedger>,
    gateway: Arc<dyn PaymentGateway>,
}

impl SubscriptionService {
    pub fn new(ledger: Arc<SubscriptionLedger>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { ledger, gateway }
    }

    pub fn ledger(&self) -> &SubscriptionLedger {
        &self.ledger
    }

    /// Charge `user` for `plan_id` and record the new subscription.
    ///
    /// A declined payment leaves the ledger untouched.
    pub fn subscribe(
        &self,
        user: &str,
        plan_id: &str,
        payment: &PaymentDetails,
    ) -> BillingResult<SubscriptionConfirmation> {
        let plan = find_plan(plan_id)?;
        let payment_status = self.gateway.charge(plan, payment)?;

        let now = Utc::now();
        let subscription = UserSubscription {
            plan: plan.level,
            subscription_id: generate_subscription_id(),
            next_billing_date: now + Duration::days(BILLING_PERIOD_DAYS),
            is_active: true,
        };
        self.ledger.record(user, subscription.clone());

        tracing::info!(
            user = user,
            plan_id = plan.id,
            subscription_id = %subscription.subscription_id,
            "subscription created"
        );

        let customer_email = payment
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_EMAIL)
            .to_string();

        Ok(SubscriptionConfirmation {
            subscription_id: subscription.subscription_id,
            plan_id: plan.id.to_string(),
            plan_name: plan.name.to_string(),
            next_billing_date: subscription.next_billing_date,
            payment_status: payment_status.as_str().to_string(),
            customer_email,
            renewal_status: "active".to_string(),
            timestamp: now,
        })
    }

    pub fn status(&self, user: &str) -> SubscriptionStatus {
        let subscription = self.ledger.get(user);
        let level = self.ledger.level(user);
        SubscriptionStatus {
            plan: plan_for_level(subscription.plan),
            permissions: PlanPermissions::for_level(level),
            subscription,
        }
    }

    /// Drop `user` back to the free plan
    pub fn cancel(&self, user: &str) -> bool {
        let cleared = self.ledger.clear(user);
        if cleared {
            tracing::info!(user = user, "subscription cleared");
        }
        cleared
    }
}

/// `sub_` followed by 13 lowercase alphanumerics
fn generate_subscription_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUBSCRIPTION_ID_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUBSCRIPTION_ID_ALPHABET.len());
            char::from(SUBSCRIPTION_ID_ALPHABET[idx])
        })
        .collect();
    format!("sub_{}", suffix)
}
