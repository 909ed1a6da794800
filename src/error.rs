use crate::providers::ProviderKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures of the login/callback flow. Nothing here is retried.
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid oauth state")]
    InvalidState,

    #[error("unknown oauth provider: {0}")]
    UnknownProvider(String),

    #[error("code exchange failed: {0}")]
    TokenExchange(String),

    #[error("could not get user info: {0}")]
    ProfileFetch(#[from] reqwest::Error),

    #[error("could not unmarshal user data: {0}")]
    ProfileDecode(#[from] serde_json::Error),

    #[error("invalid provider endpoint: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),
}

impl OAuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            OAuthError::InvalidState => StatusCode::UNAUTHORIZED,
            OAuthError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            OAuthError::TokenExchange(_)
            | OAuthError::ProfileFetch(_)
            | OAuthError::ProfileDecode(_) => StatusCode::BAD_GATEWAY,
            OAuthError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "oauth request failed");

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    MissingVar(String),

    #[error("invalid {provider} configuration: {source}")]
    Provider {
        provider: ProviderKind,
        #[source]
        source: OAuthError,
    },
}
