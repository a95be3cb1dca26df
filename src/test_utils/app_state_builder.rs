//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` whose use cases run against
//! an `InMemorySubscriptionRecordRepo` instead of the document store.

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        classifier::UnmappedEventPolicy,
        use_cases::subscription_sync::{SubscriptionRecordRepo, SubscriptionSyncUseCases},
    },
    domain::entities::user_subscription::UserSubscriptionRecord,
    infra::config::{AppConfig, AppwriteConfig},
    test_utils::InMemorySubscriptionRecordRepo,
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_record("u1", UserSubscriptionRecord::default())
///     .with_webhook_token("Bearer whk_test")
///     .build();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    records: Vec<(String, UserSubscriptionRecord)>,
    policy: UnmappedEventPolicy,
    ordering_guard: bool,
    webhook_token: Option<String>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, user_id: &str, record: UserSubscriptionRecord) -> Self {
        self.records.push((user_id.to_string(), record));
        self
    }

    pub fn with_policy(mut self, policy: UnmappedEventPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_ordering_guard(mut self) -> Self {
        self.ordering_guard = true;
        self
    }

    pub fn with_webhook_token(mut self, token: &str) -> Self {
        self.webhook_token = Some(token.to_string());
        self
    }

    /// Build the state and hand back the repo for assertions.
    pub fn build(self) -> (AppState, Arc<InMemorySubscriptionRecordRepo>) {
        let repo = Arc::new(InMemorySubscriptionRecordRepo::with_records(
            self.records
                .iter()
                .map(|(id, record)| (id.as_str(), record.clone()))
                .collect(),
        ));

        let config = AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            appwrite: AppwriteConfig {
                endpoint: Url::parse("http://127.0.0.1:9/v1").unwrap(),
                project_id: "test-project".to_string(),
                api_key: SecretString::new("test-key".into()),
                database_id: "astra_db".to_string(),
                collection_id: "users".to_string(),
                self_signed: false,
            },
            unmapped_event_policy: self.policy,
            ordering_guard: self.ordering_guard,
            webhook_auth_token: self.webhook_token.map(|t| SecretString::new(t.into())),
        };

        let sync_use_cases = SubscriptionSyncUseCases::new(
            repo.clone() as Arc<dyn SubscriptionRecordRepo>,
            self.policy,
            self.ordering_guard,
        );

        let app_state = AppState {
            config: Arc::new(config),
            sync_use_cases: Arc::new(sync_use_cases),
        };

        (app_state, repo)
    }
}
