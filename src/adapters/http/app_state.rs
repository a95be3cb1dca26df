use std::sync::Arc;

use crate::{
    application::use_cases::subscription_sync::SubscriptionSyncUseCases,
    infra::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sync_use_cases: Arc<SubscriptionSyncUseCases>,
}
