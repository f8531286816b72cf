//! Melodia Billing
//!
//! Pricing plans, plan permissions, a simulated payment gateway and the
//! in-memory subscription ledger.

pub mod entitlement;
pub mod error;
pub mod payment;
pub mod plans;
pub mod subscription;

pub use entitlement::PlanPermissions;
pub use error::{BillingError, BillingResult};
pub use payment::{PaymentDetails, PaymentGateway, PaymentStatus, SimulatedGateway};
pub use plans::{find_plan, plans, quote, PlanQuote, PricingPlan};
pub use subscription::{
    SubscriptionConfirmation, SubscriptionLedger, SubscriptionService, SubscriptionStatus,
    UserSubscription,
};
