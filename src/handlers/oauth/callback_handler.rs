use crate::error::OAuthError;
use crate::models::{AppState, CallbackParams, UserInfo};
use crate::providers::ProviderKind;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};

pub async fn callback_handler(
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
    State(app_state): State<AppState>,
) -> Result<Json<UserInfo>, OAuthError> {
    let kind: ProviderKind = provider.parse()?;
    let user = app_state
        .oauth
        .handle_external_callback(kind, &params)
        .await?;

    tracing::info!(provider = %kind, email = %user.email, "external login succeeded");
    Ok(Json(user))
}
