use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Value as JsonValue, json};

use crate::{
    adapters::persistence::{AppwritePersistence, parse_json_with_fallback},
    app_error::AppResult,
    application::use_cases::subscription_sync::SubscriptionRecordRepo,
    domain::entities::user_subscription::UserSubscriptionRecord,
};

const ENTITY_TYPE: &str = "user";

fn record_from_document(document: &JsonValue, user_id: &str) -> UserSubscriptionRecord {
    let field = |name: &str| document.get(name).unwrap_or(&JsonValue::Null);

    UserSubscriptionRecord {
        subscription_status: parse_json_with_fallback(
            field("subscriptionStatus"),
            "subscriptionStatus",
            ENTITY_TYPE,
            user_id,
        ),
        subscription_tier: parse_json_with_fallback(
            field("subscriptionTier"),
            "subscriptionTier",
            ENTITY_TYPE,
            user_id,
        ),
        subscription_expiry: parse_json_with_fallback(
            field("subscriptionExpiry"),
            "subscriptionExpiry",
            ENTITY_TYPE,
            user_id,
        ),
        subscription_event_at: parse_json_with_fallback(
            field("subscriptionEventAt"),
            "subscriptionEventAt",
            ENTITY_TYPE,
            user_id,
        ),
    }
}

#[async_trait]
impl SubscriptionRecordRepo for AppwritePersistence {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserSubscriptionRecord>> {
        let url = self.document_url(user_id)?;
        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from_response(response, user_id).await);
        }

        let document: JsonValue = response.json().await?;
        Ok(Some(record_from_document(&document, user_id)))
    }

    async fn update(&self, user_id: &str, record: &UserSubscriptionRecord) -> AppResult<()> {
        let url = self.document_url(user_id)?;
        let response = self
            .request(Method::PATCH, url)
            .json(&json!({ "data": record }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, user_id).await);
        }

        tracing::debug!(user_id, "Subscription fields written");
        Ok(())
    }
}
