use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::classifier::{UnmappedEventPolicy, classify};
use crate::domain::entities::subscription_event::SubscriptionEvent;
use crate::domain::entities::user_subscription::{
    SubscriptionStatus, SubscriptionTier, UserSubscriptionRecord,
};

// ============================================================================
// Repository Trait
// ============================================================================

/// Subscription fields of user documents, keyed by user id.
#[async_trait]
pub trait SubscriptionRecordRepo: Send + Sync {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserSubscriptionRecord>>;

    /// Overwrite the subscription fields of an existing user document.
    ///
    /// Fails with `AppError::NotFound` when the document does not exist;
    /// documents are never created here.
    async fn update(&self, user_id: &str, record: &UserSubscriptionRecord) -> AppResult<()>;
}

// ============================================================================
// Outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoUser,
    NoChange,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied {
        status: SubscriptionStatus,
        tier: SubscriptionTier,
    },
    Skipped(SkipReason),
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct SubscriptionSyncUseCases {
    repo: Arc<dyn SubscriptionRecordRepo>,
    policy: UnmappedEventPolicy,
    ordering_guard: bool,
}

impl SubscriptionSyncUseCases {
    /// `ordering_guard` enables the stale-event check. It needs an integer
    /// `subscriptionEventAt` attribute on the user collection.
    pub fn new(
        repo: Arc<dyn SubscriptionRecordRepo>,
        policy: UnmappedEventPolicy,
        ordering_guard: bool,
    ) -> Self {
        Self {
            repo,
            policy,
            ordering_guard,
        }
    }

    pub fn policy(&self) -> UnmappedEventPolicy {
        self.policy
    }

    pub fn ordering_guard(&self) -> bool {
        self.ordering_guard
    }

    /// Project a single event onto the user's stored subscription.
    #[instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub async fn sync_event(&self, event: &SubscriptionEvent) -> AppResult<SyncOutcome> {
        let Some(user_id) = event.user_id() else {
            tracing::debug!("Event has no app_user_id, nothing to sync");
            return Ok(SyncOutcome::Skipped(SkipReason::NoUser));
        };

        let classification = classify(event, self.policy)?;
        let Some((status, tier)) = classification.target() else {
            tracing::info!(user_id, "Event leaves subscription unchanged");
            return Ok(SyncOutcome::Skipped(SkipReason::NoChange));
        };

        // Without the guard the timestamp is ignored and only the three
        // subscription fields are written.
        let event_at = event.event_timestamp_ms.filter(|_| self.ordering_guard);

        if let Some(event_at) = event_at {
            let current = self
                .repo
                .get(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound(user_id.to_string()))?;

            if let Some(last_applied) = current.subscription_event_at
                && last_applied >= event_at
            {
                tracing::info!(
                    user_id,
                    event_at,
                    last_applied,
                    "Ignoring event older than the last applied one"
                );
                return Ok(SyncOutcome::Skipped(SkipReason::Stale));
            }
        }

        let record = UserSubscriptionRecord::snapshot(
            status,
            tier,
            event.expires_at(),
            event_at,
        );
        self.repo.update(user_id, &record).await?;

        tracing::info!(
            user_id,
            status = %record.subscription_status,
            tier = %record.subscription_tier,
            "Updated user subscription"
        );

        Ok(SyncOutcome::Applied {
            status: record.subscription_status,
            tier: record.subscription_tier,
        })
    }
}
