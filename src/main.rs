use dotenvy::dotenv;
use tracing::{error, info};

use subscription_sync::infra::{
    app::create_app,
    config::AppConfig,
    error::InfraError,
    setup::{init_app_state, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().inspect_err(|err| {
        error!(error = %err, "Refusing to start with invalid configuration");
    })?;

    let bind_addr = config.bind_addr;
    let app_state = init_app_state(config)?;
    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    info!("Subscription sync listening at {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(InfraError::Server)?;

    Ok(())
}
