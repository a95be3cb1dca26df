use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::subscription_event::{EventEnvelope, SubscriptionEvent};

/// Extract the billing event from a raw webhook body.
///
/// Accepts either the function-style wrapper `{ "payload": "<json>" }`, where
/// the payload string holds `{ "event": ... }`, or the provider's own
/// `{ "event": ... }` body. The event is validated before it is returned.
pub fn parse_webhook_body(body: &str) -> AppResult<SubscriptionEvent> {
    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| AppError::InvalidPayload(format!("body is not valid JSON: {}", e)))?;

    let envelope: EventEnvelope = match value.get("payload") {
        Some(JsonValue::String(inner)) => serde_json::from_str(inner)
            .map_err(|e| AppError::InvalidPayload(format!("invalid payload: {}", e)))?,
        Some(JsonValue::Object(_)) => serde_json::from_value(value["payload"].clone())
            .map_err(|e| AppError::InvalidPayload(format!("invalid payload: {}", e)))?,
        Some(_) => {
            return Err(AppError::InvalidPayload(
                "payload must be a JSON-encoded string".to_string(),
            ));
        }
        None => serde_json::from_value(value)
            .map_err(|e| AppError::InvalidPayload(format!("invalid event envelope: {}", e)))?,
    };

    validate_event(&envelope.event)?;

    tracing::info!(
        event_type = %envelope.event.event_type,
        event_id = ?envelope.event.id,
        api_version = ?envelope.api_version,
        "Received event"
    );

    Ok(envelope.event)
}

fn validate_event(event: &SubscriptionEvent) -> AppResult<()> {
    if event.event_type.as_str().trim().is_empty() {
        return Err(AppError::InvalidPayload("event type is empty".into()));
    }

    if let Some(ms) = event.expiration_at_ms
        && DateTime::<Utc>::from_timestamp_millis(ms).is_none()
    {
        return Err(AppError::InvalidPayload(format!(
            "expiration_at_ms {} is out of range",
            ms
        )));
    }

    if let Some(ms) = event.event_timestamp_ms
        && ms < 0
    {
        return Err(AppError::InvalidPayload(format!(
            "event_timestamp_ms {} is negative",
            ms
        )));
    }

    Ok(())
}
