mod error;
mod handlers;
mod models;
mod providers;
mod services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use axum::Router;
    use models::{AppConfig, AppState};
    use services::OAuthService;
    use std::sync::Arc;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("serenity_oauth=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let app_config = AppConfig::from_env()?;
    let http = providers::http_client()?;

    let oauth = OAuthService::from_configs(
        app_config.oauth_state.clone(),
        http,
        app_config.providers.clone(),
    );

    let registered: Vec<_> = oauth.registered().map(|kind| kind.as_str()).collect();
    if registered.is_empty() {
        tracing::warn!("no oauth providers configured; every login will fail");
    } else {
        tracing::info!(providers = ?registered, "oauth providers registered");
    }

    let app_state = AppState {
        oauth: Arc::new(oauth),
    };

    let app = Router::new()
        .merge(handlers::oauth::routes())
        .with_state(app_state);

    tracing::info!("listening on http://{}", app_config.addr);

    let listener = tokio::net::TcpListener::bind(&app_config.addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
