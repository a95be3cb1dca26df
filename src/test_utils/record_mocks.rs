use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::subscription_sync::SubscriptionRecordRepo,
    domain::entities::user_subscription::UserSubscriptionRecord,
};

// ============================================================================
// InMemorySubscriptionRecordRepo
// ============================================================================

/// Document store double. Updates behave like a partial document patch: a
/// record without `subscription_event_at` keeps the stored one.
#[derive(Default)]
pub struct InMemorySubscriptionRecordRepo {
    pub records: Mutex<HashMap<String, UserSubscriptionRecord>>,
    calls: AtomicUsize,
}

impl InMemorySubscriptionRecordRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<(&str, UserSubscriptionRecord)>) -> Self {
        let map = records
            .into_iter()
            .map(|(id, record)| (id.to_string(), record))
            .collect();
        Self {
            records: Mutex::new(map),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn record(&self, user_id: &str) -> Option<UserSubscriptionRecord> {
        self.records.lock().unwrap().get(user_id).cloned()
    }

    /// Number of `get` and `update` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriptionRecordRepo for InMemorySubscriptionRecordRepo {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserSubscriptionRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.record(user_id))
    }

    async fn update(&self, user_id: &str, record: &UserSubscriptionRecord) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(user_id.to_string()))?;

        let event_at = record.subscription_event_at.or(stored.subscription_event_at);
        *stored = UserSubscriptionRecord {
            subscription_event_at: event_at,
            ..record.clone()
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user_subscription::{SubscriptionStatus, SubscriptionTier};

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let repo = InMemorySubscriptionRecordRepo::new();
        let result = repo
            .update("ghost", &UserSubscriptionRecord::default())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repo.record("ghost").is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_event_marker_when_absent() {
        let mut stored = UserSubscriptionRecord::default();
        stored.subscription_event_at = Some(42);
        let repo = InMemorySubscriptionRecordRepo::with_records(vec![("u1", stored)]);

        let update = UserSubscriptionRecord::snapshot(
            SubscriptionStatus::Active,
            SubscriptionTier::Pro,
            None,
            None,
        );
        repo.update("u1", &update).await.unwrap();

        let record = repo.record("u1").unwrap();
        assert_eq!(record.subscription_tier, SubscriptionTier::Pro);
        assert_eq!(record.subscription_event_at, Some(42));
        assert_eq!(repo.call_count(), 1);
    }
}
