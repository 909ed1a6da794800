use crate::error::OAuthError;
use crate::models::AppState;
use crate::providers::ProviderKind;
use axum::{
    extract::{Path, State},
    response::Redirect,
};

pub async fn login_handler(
    Path(provider): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Redirect, OAuthError> {
    let kind: ProviderKind = provider.parse()?;
    let url = app_state.oauth.handle_external_login(kind)?;

    tracing::debug!(provider = %kind, "redirecting to provider authorization endpoint");
    Ok(Redirect::to(url.as_str()))
}
