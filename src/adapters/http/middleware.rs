use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Require the configured `Authorization` value on webhook requests.
///
/// The billing provider sends the header verbatim as entered in its
/// dashboard. Without a configured token every request passes.
pub async fn webhook_auth_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = &app_state.config.webhook_auth_token {
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if !provided.is_some_and(|value| tokens_match(value, expected.expose_secret())) {
            tracing::warn!(
                header_present = provided.is_some(),
                "Rejected webhook with invalid Authorization header"
            );
            return Err(AppError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}

// Compare digests so the match time does not depend on the token prefix.
fn tokens_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
