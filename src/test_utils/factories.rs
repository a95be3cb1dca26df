use chrono::{DateTime, Utc};

use crate::domain::entities::{
    subscription_event::{SubscriptionEvent, SubscriptionEventType},
    user_subscription::{SubscriptionStatus, SubscriptionTier, UserSubscriptionRecord, format_expiry},
};

/// Build an event of the given type with a user and product set.
///
/// The closure can override any field:
///
/// ```ignore
/// let event = create_test_event("RENEWAL", |e| e.product_id = None);
/// ```
pub fn create_test_event(
    event_type: &str,
    customize: impl FnOnce(&mut SubscriptionEvent),
) -> SubscriptionEvent {
    let mut event = SubscriptionEvent {
        event_type: SubscriptionEventType::parse(event_type),
        id: Some("evt_test".to_string()),
        app_user_id: Some("user_test".to_string()),
        product_id: Some("com.app.basic_monthly".to_string()),
        expiration_at_ms: None,
        event_timestamp_ms: None,
    };
    customize(&mut event);
    event
}

/// A stored record with the given status and tier and a fixed expiry.
pub fn create_test_record(
    status: SubscriptionStatus,
    tier: SubscriptionTier,
) -> UserSubscriptionRecord {
    let expiry = DateTime::<Utc>::from_timestamp(1_767_225_600, 0).map(format_expiry);
    UserSubscriptionRecord {
        subscription_status: status,
        subscription_tier: tier,
        subscription_expiry: expiry,
        subscription_event_at: None,
    }
}
