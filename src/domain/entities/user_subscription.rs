use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Subscription status stored on the user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Free,
    Active,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Free => "free",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product level of an active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Premium => "premium",
        }
    }

    /// Derive the tier from a store product identifier.
    ///
    /// Matching is by substring with precedence premium > pro > basic, so
    /// `"pro_basic_bundle"` resolves to `Pro`. Anything else is `Free`.
    pub fn from_product_id(product_id: &str) -> Self {
        if product_id.contains("premium") {
            SubscriptionTier::Premium
        } else if product_id.contains("pro") {
            SubscriptionTier::Pro
        } else if product_id.contains("basic") {
            SubscriptionTier::Basic
        } else {
            SubscriptionTier::Free
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription fields as they live on the user document.
///
/// Only these fields are ever written; the rest of the document belongs to
/// other parts of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscriptionRecord {
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub subscription_expiry: Option<String>,
    /// Provider timestamp (epoch ms) of the last applied event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_event_at: Option<i64>,
}

impl UserSubscriptionRecord {
    /// Build the replacement snapshot for a classified event.
    ///
    /// A `Free` status always carries the `Free` tier and no expiry.
    pub fn snapshot(
        status: SubscriptionStatus,
        tier: SubscriptionTier,
        expiry: Option<DateTime<Utc>>,
        event_at: Option<i64>,
    ) -> Self {
        let (tier, expiry) = match status {
            SubscriptionStatus::Free => (SubscriptionTier::Free, None),
            _ => (tier, expiry),
        };

        Self {
            subscription_status: status,
            subscription_tier: tier,
            subscription_expiry: expiry.map(format_expiry),
            subscription_event_at: event_at,
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
