//! Maps a billing event onto the subscription state it implies.

use std::str::FromStr;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::subscription_event::{SubscriptionEvent, SubscriptionEventType};
use crate::domain::entities::user_subscription::{SubscriptionStatus, SubscriptionTier};

/// What to do with event types that carry no entitlement change of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedEventPolicy {
    /// Leave the stored subscription untouched.
    #[default]
    Unchanged,
    /// Overwrite the stored subscription with free/free.
    ResetToFree,
}

impl UnmappedEventPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnmappedEventPolicy::Unchanged => "unchanged",
            UnmappedEventPolicy::ResetToFree => "reset_to_free",
        }
    }
}

impl FromStr for UnmappedEventPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unchanged" => Ok(UnmappedEventPolicy::Unchanged),
            "reset_to_free" => Ok(UnmappedEventPolicy::ResetToFree),
            other => Err(format!(
                "unknown unmapped event policy '{}', expected 'unchanged' or 'reset_to_free'",
                other
            )),
        }
    }
}

/// Outcome of classifying one event. Always a full replacement, never a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Subscription becomes active at the given tier.
    Upgrade { tier: SubscriptionTier },
    /// Subscription drops to `status` with the free tier.
    Downgrade { status: SubscriptionStatus },
    NoChange,
}

impl Classification {
    /// Concrete `(status, tier)` pair to persist, `None` for `NoChange`.
    pub fn target(&self) -> Option<(SubscriptionStatus, SubscriptionTier)> {
        match *self {
            Classification::Upgrade { tier } => Some((SubscriptionStatus::Active, tier)),
            Classification::Downgrade { status } => Some((status, SubscriptionTier::Free)),
            Classification::NoChange => None,
        }
    }
}

pub fn classify(event: &SubscriptionEvent, policy: UnmappedEventPolicy) -> AppResult<Classification> {
    use SubscriptionEventType as T;

    match &event.event_type {
        T::InitialPurchase | T::Renewal => {
            let product_id =
                event
                    .product_id
                    .as_deref()
                    .ok_or_else(|| AppError::MissingProductId {
                        event_type: event.event_type.to_string(),
                    })?;
            Ok(Classification::Upgrade {
                tier: SubscriptionTier::from_product_id(product_id),
            })
        }
        T::Cancellation | T::Expiration => Ok(Classification::Downgrade {
            status: SubscriptionStatus::Expired,
        }),
        T::Uncancellation
        | T::NonRenewingPurchase
        | T::SubscriptionPaused
        | T::BillingIssue
        | T::ProductChange
        | T::Transfer
        | T::SubscriptionExtended
        | T::TemporaryEntitlementGrant
        | T::Test
        | T::Unknown(_) => Ok(match policy {
            UnmappedEventPolicy::Unchanged => Classification::NoChange,
            UnmappedEventPolicy::ResetToFree => Classification::Downgrade {
                status: SubscriptionStatus::Free,
            },
        }),
    }
}
