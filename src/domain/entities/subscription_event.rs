use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Lifecycle event types sent by the billing provider.
///
/// Types this service has never heard of are kept verbatim in `Unknown` so
/// they can still be logged and routed through the unmapped-event policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SubscriptionEventType {
    InitialPurchase,
    Renewal,
    Cancellation,
    Uncancellation,
    NonRenewingPurchase,
    SubscriptionPaused,
    Expiration,
    BillingIssue,
    ProductChange,
    Transfer,
    SubscriptionExtended,
    TemporaryEntitlementGrant,
    Test,
    Unknown(String),
}

impl SubscriptionEventType {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionEventType::InitialPurchase => "INITIAL_PURCHASE",
            SubscriptionEventType::Renewal => "RENEWAL",
            SubscriptionEventType::Cancellation => "CANCELLATION",
            SubscriptionEventType::Uncancellation => "UNCANCELLATION",
            SubscriptionEventType::NonRenewingPurchase => "NON_RENEWING_PURCHASE",
            SubscriptionEventType::SubscriptionPaused => "SUBSCRIPTION_PAUSED",
            SubscriptionEventType::Expiration => "EXPIRATION",
            SubscriptionEventType::BillingIssue => "BILLING_ISSUE",
            SubscriptionEventType::ProductChange => "PRODUCT_CHANGE",
            SubscriptionEventType::Transfer => "TRANSFER",
            SubscriptionEventType::SubscriptionExtended => "SUBSCRIPTION_EXTENDED",
            SubscriptionEventType::TemporaryEntitlementGrant => "TEMPORARY_ENTITLEMENT_GRANT",
            SubscriptionEventType::Test => "TEST",
            SubscriptionEventType::Unknown(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "INITIAL_PURCHASE" => SubscriptionEventType::InitialPurchase,
            "RENEWAL" => SubscriptionEventType::Renewal,
            "CANCELLATION" => SubscriptionEventType::Cancellation,
            "UNCANCELLATION" => SubscriptionEventType::Uncancellation,
            "NON_RENEWING_PURCHASE" => SubscriptionEventType::NonRenewingPurchase,
            "SUBSCRIPTION_PAUSED" => SubscriptionEventType::SubscriptionPaused,
            "EXPIRATION" => SubscriptionEventType::Expiration,
            "BILLING_ISSUE" => SubscriptionEventType::BillingIssue,
            "PRODUCT_CHANGE" => SubscriptionEventType::ProductChange,
            "TRANSFER" => SubscriptionEventType::Transfer,
            "SUBSCRIPTION_EXTENDED" => SubscriptionEventType::SubscriptionExtended,
            "TEMPORARY_ENTITLEMENT_GRANT" => SubscriptionEventType::TemporaryEntitlementGrant,
            "TEST" => SubscriptionEventType::Test,
            other => SubscriptionEventType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SubscriptionEventType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl std::fmt::Display for SubscriptionEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single billing event as delivered by the provider.
///
/// Every field besides `type` is optional on the wire; unknown fields are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionEvent {
    #[serde(rename = "type")]
    pub event_type: SubscriptionEventType,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub app_user_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub expiration_at_ms: Option<i64>,
    #[serde(default)]
    pub event_timestamp_ms: Option<i64>,
}

impl SubscriptionEvent {
    /// The user the event belongs to, exactly as sent. Blank identifiers
    /// count as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.app_user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// Expiry instant. A zero timestamp means "no expiry", the same as an
    /// absent one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_at_ms
            .filter(|ms| *ms != 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// `{ "event": ... }` body as posted by the provider.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub event: SubscriptionEvent,
    #[serde(default)]
    pub api_version: Option<String>,
}
