use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    infra::config::AppwriteConfig,
};

pub mod user_subscription;

const MAX_JSON_LOG_LEN: usize = 200;

/// Parse JSON value to target type, logging warning on failure.
///
/// Handles NULL and missing attributes gracefully (returns default without
/// logging). Only logs warnings for actual parse failures, such as a status
/// string this service does not know.
pub fn parse_json_with_fallback<T: serde::de::DeserializeOwned + Default>(
    json: &serde_json::Value,
    field_name: &str,
    entity_type: &str,
    entity_id: &str,
) -> T {
    if json.is_null() {
        return T::default();
    }

    serde_json::from_value(json.clone()).unwrap_or_else(|err| {
        // Truncate raw JSON to prevent log bloat from large values
        let raw_str = json.to_string();
        let truncated = if raw_str.len() > MAX_JSON_LOG_LEN {
            format!("{}...", raw_str.chars().take(MAX_JSON_LOG_LEN).collect::<String>())
        } else {
            raw_str
        };

        tracing::warn!(
            field = field_name,
            entity_type = entity_type,
            entity_id = entity_id,
            raw_json = %truncated,
            error = %err,
            "Failed to parse JSON field, using default value"
        );
        T::default()
    })
}

/// REST client for the document database that holds user records.
#[derive(Clone)]
pub struct AppwritePersistence {
    client: Client,
    endpoint: Url,
    project_id: String,
    api_key: SecretString,
    database_id: String,
    collection_id: String,
}

#[derive(Deserialize)]
struct AppwriteErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

impl AppwritePersistence {
    pub fn new(client: Client, config: &AppwriteConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
        }
    }

    /// `{endpoint}/databases/{db}/collections/{col}/documents/{id}` with
    /// every segment percent-encoded.
    fn document_url(&self, document_id: &str) -> AppResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("document store endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .extend([
                "databases",
                self.database_id.as_str(),
                "collections",
                self.collection_id.as_str(),
                "documents",
                document_id,
            ]);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", self.api_key.expose_secret())
    }

    /// Map a non-success response onto the error taxonomy. 404 means the
    /// document does not exist; everything else is a store failure.
    async fn error_from_response(response: Response, document_id: &str) -> AppError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return AppError::NotFound(document_id.to_string());
        }

        let body = response.json::<AppwriteErrorBody>().await.ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| status.to_string());
        let error_type = body.and_then(|b| b.error_type);

        tracing::warn!(
            status = status.as_u16(),
            error_type = ?error_type,
            document_id,
            "Document store request failed"
        );

        AppError::Persistence(format!("{} (HTTP {})", message, status.as_u16()))
    }
}
