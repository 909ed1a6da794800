use crate::error::ConfigError;
use crate::providers::{ProviderConfig, ProviderKind};
use crate::services::OAuthService;
use std::sync::Arc;

const DEFAULT_ADDR: &str = "0.0.0.0:10000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub addr: String,
    pub oauth_state: String,
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// A provider is registered only when its `<P>_CLIENT_ID` is set; its
    /// secret and redirect URL are then required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let require = |key: String| get(&key).ok_or(ConfigError::MissingVar(key));

        let oauth_state = require("OAUTH_STATE_STRING".to_string())?;
        let addr = get("APP_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let mut providers = Vec::new();
        for kind in ProviderKind::ALL {
            let prefix = kind.env_prefix();
            let Some(client_id) = get(&format!("{prefix}_CLIENT_ID")) else {
                continue;
            };
            let client_secret = require(format!("{prefix}_CLIENT_SECRET"))?;
            let redirect_url = require(format!("{prefix}_REDIRECT_URL"))?;

            let config = ProviderConfig::new(kind, client_id, client_secret, redirect_url)
                .map_err(|source| ConfigError::Provider {
                    provider: kind,
                    source,
                })?;
            providers.push(config);
        }

        Ok(Self {
            addr,
            oauth_state,
            providers,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub oauth: Arc<OAuthService>,
}
