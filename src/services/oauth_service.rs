use crate::error::OAuthError;
use crate::models::{CallbackParams, UserInfo};
use crate::providers::{self, OAuthProvider, ProviderConfig, ProviderKind};
use oauth2::url::Url;
use std::collections::HashMap;
use std::sync::Arc;

/// Login and callback flow over the registered providers.
///
/// The state string is the same for every flow and never expires.
pub struct OAuthService {
    state: String,
    http: reqwest::Client,
    providers: HashMap<ProviderKind, Arc<dyn OAuthProvider>>,
}

impl OAuthService {
    pub fn new(state: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            state: state.into(),
            http,
            providers: HashMap::new(),
        }
    }

    pub fn from_configs(
        state: impl Into<String>,
        http: reqwest::Client,
        configs: impl IntoIterator<Item = ProviderConfig>,
    ) -> Self {
        configs
            .into_iter()
            .fold(Self::new(state, http), |service, config| {
                service.with_provider(providers::from_config(config))
            })
    }

    pub fn with_provider(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn provider(&self, kind: ProviderKind) -> Result<&Arc<dyn OAuthProvider>, OAuthError> {
        self.providers
            .get(&kind)
            .ok_or_else(|| OAuthError::UnknownProvider(kind.to_string()))
    }

    pub fn registered(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.providers.keys().copied()
    }

    pub fn handle_external_login(&self, kind: ProviderKind) -> Result<Url, OAuthError> {
        Ok(self.provider(kind)?.authorize_url(&self.state))
    }

    pub async fn handle_external_callback(
        &self,
        kind: ProviderKind,
        params: &CallbackParams,
    ) -> Result<UserInfo, OAuthError> {
        if params.state != self.state {
            return Err(OAuthError::InvalidState);
        }

        let provider = self.provider(kind)?;
        let access_token = provider.exchange_token(&self.http, &params.code).await?;

        provider.fetch_profile(&self.http, &access_token).await
    }
}
