use crate::{
    adapters::{http::app_state::AppState, persistence::AppwritePersistence},
    infra::{config::AppConfig, error::InfraError, http_client::try_build_client},
    use_cases::subscription_sync::{SubscriptionRecordRepo, SubscriptionSyncUseCases},
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    if config.appwrite.self_signed {
        tracing::warn!("Accepting self-signed certificates from the document store");
    }

    let client = try_build_client(config.appwrite.self_signed).map_err(InfraError::HttpClient)?;
    let persistence = Arc::new(AppwritePersistence::new(client, &config.appwrite));

    let sync_use_cases = SubscriptionSyncUseCases::new(
        persistence as Arc<dyn SubscriptionRecordRepo>,
        config.unmapped_event_policy,
        config.ordering_guard,
    );

    tracing::info!(
        database_id = %config.appwrite.database_id,
        collection_id = %config.appwrite.collection_id,
        unmapped_event_policy = sync_use_cases.policy().as_str(),
        ordering_guard = sync_use_cases.ordering_guard(),
        webhook_auth = config.webhook_auth_token.is_some(),
        "Subscription sync configured"
    );

    Ok(AppState {
        config: Arc::new(config),
        sync_use_cases: Arc::new(sync_use_cases),
    })
}

/// Console logs always; JSON logs additionally go to `LOG_FILE` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "subscription_sync=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let (json_layer, file_error) = match std::env::var("LOG_FILE") {
        Ok(path) if !path.trim().is_empty() => match File::create(&path) {
            Ok(file) => {
                let layer = fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true);
                (Some(layer), None)
            }
            Err(e) => (None, Some((path, e))),
        },
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some((path, e)) = file_error {
        tracing::warn!(path = %path, error = %e, "Cannot create log file, logging to console only");
    }
}
