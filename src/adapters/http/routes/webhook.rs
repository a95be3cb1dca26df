//! Billing provider webhook.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::error;

use crate::{
    adapters::http::{app_state::AppState, middleware::webhook_auth_middleware},
    app_error::AppResult,
    application::helpers::event_parsing::parse_webhook_body,
};

#[derive(Debug, Serialize)]
struct WebhookAck {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// POST /api/webhooks/subscription
///
/// Malformed bodies take the regular error path (400). Failures while
/// classifying or persisting are reported as `{ success: false, error }`
/// with a 500 so the provider redelivers.
async fn handle_subscription_event(
    State(app_state): State<AppState>,
    body: String,
) -> AppResult<Response> {
    let event = parse_webhook_body(&body)?;

    match app_state.sync_use_cases.sync_event(&event).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "Webhook processed");
            Ok((
                StatusCode::OK,
                Json(WebhookAck {
                    success: true,
                    error: None,
                }),
            )
                .into_response())
        }
        Err(e) => {
            error!(
                error = %e,
                event_type = %event.event_type,
                event_id = ?event.id,
                "Error processing webhook"
            );
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookAck {
                    success: false,
                    error: Some(e.to_string()),
                }),
            )
                .into_response())
        }
    }
}

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/subscription", post(handle_subscription_event))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            webhook_auth_middleware,
        ))
}
