pub mod health;
pub mod webhook;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/webhooks", webhook::router(app_state))
        .merge(health::router())
}
