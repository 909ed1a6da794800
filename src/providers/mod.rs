mod discord;
mod github;
mod google;

pub use discord::DiscordProvider;
pub use github::GithubProvider;
pub use google::GoogleProvider;

use crate::error::OAuthError;
use crate::models::UserInfo;
use async_trait::async_trait;
use oauth2::basic::{BasicClient, BasicRequestTokenError};
use oauth2::url::Url;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    HttpClientError, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Github,
    Discord,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Google,
        ProviderKind::Github,
        ProviderKind::Discord,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Github => "github",
            ProviderKind::Discord => "discord",
        }
    }

    pub fn env_prefix(self) -> &'static str {
        match self {
            ProviderKind::Google => "GOOGLE",
            ProviderKind::Github => "GITHUB",
            ProviderKind::Discord => "DISCORD",
        }
    }

    pub fn default_endpoints(self) -> Endpoints {
        let (auth_url, token_url, profile_url) = match self {
            ProviderKind::Google => (
                "https://accounts.google.com/o/oauth2/auth",
                "https://oauth2.googleapis.com/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            ),
            ProviderKind::Github => (
                "https://github.com/login/oauth/authorize",
                "https://github.com/login/oauth/access_token",
                "https://api.github.com/user",
            ),
            ProviderKind::Discord => (
                "https://discord.com/api/oauth2/authorize",
                "https://discord.com/api/oauth2/token",
                "https://discord.com/api/users/@me",
            ),
        };

        Endpoints {
            auth_url: auth_url.to_string(),
            token_url: token_url.to_string(),
            profile_url: profile_url.to_string(),
        }
    }

    pub fn default_scopes(self) -> &'static [&'static str] {
        match self {
            ProviderKind::Google => &[
                "https://www.googleapis.com/auth/userinfo.email",
                "https://www.googleapis.com/auth/userinfo.profile",
            ],
            ProviderKind::Github => &["read:user", "user:email"],
            ProviderKind::Discord => &["identify", "email"],
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OAuthError::UnknownProvider(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth_url: String,
    pub token_url: String,
    pub profile_url: String,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
    pub scopes: Vec<Scope>,
    pub profile_url: Url,
}

impl ProviderConfig {
    pub fn new(
        kind: ProviderKind,
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> Result<Self, OAuthError> {
        Self::with_endpoints(
            kind,
            client_id,
            client_secret,
            redirect_url,
            kind.default_endpoints(),
        )
    }

    pub fn with_endpoints(
        kind: ProviderKind,
        client_id: String,
        client_secret: String,
        redirect_url: String,
        endpoints: Endpoints,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            kind,
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(endpoints.auth_url)?,
            token_url: TokenUrl::new(endpoints.token_url)?,
            redirect_url: RedirectUrl::new(redirect_url)?,
            scopes: kind
                .default_scopes()
                .iter()
                .map(|scope| Scope::new(scope.to_string()))
                .collect(),
            profile_url: Url::parse(&endpoints.profile_url)?,
        })
    }

    fn client(&self) -> ConfiguredClient {
        BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
    }
}

/// One identity provider: how to send a user there, how to turn the
/// returned code into a token, and how to read the user's profile.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn config(&self) -> &ProviderConfig;

    fn kind(&self) -> ProviderKind {
        self.config().kind
    }

    fn authorize_url(&self, state: &str) -> Url {
        let config = self.config();
        let state = state.to_string();

        let (url, _) = config
            .client()
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(config.scopes.iter().cloned())
            .url();

        url
    }

    async fn exchange_token(
        &self,
        http: &reqwest::Client,
        code: &str,
    ) -> Result<String, OAuthError> {
        let client = self.config().client();

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(http)
            .await
            .map_err(exchange_error)?;

        Ok(token.access_token().secret().to_string())
    }

    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<UserInfo, OAuthError>;
}

fn exchange_error(err: BasicRequestTokenError<HttpClientError<reqwest::Error>>) -> OAuthError {
    let message = match &err {
        RequestTokenError::ServerResponse(response) => match response.error_description() {
            Some(description) => format!("{}: {}", response.error(), description),
            None => response.error().to_string(),
        },
        RequestTokenError::Parse(parse_err, body) => {
            format!("{}: {}", parse_err, String::from_utf8_lossy(body))
        }
        other => other.to_string(),
    };

    OAuthError::TokenExchange(message)
}

/// Picks the implementation for a config by its tag.
pub fn from_config(config: ProviderConfig) -> Arc<dyn OAuthProvider> {
    match config.kind {
        ProviderKind::Google => Arc::new(GoogleProvider::new(config)),
        ProviderKind::Github => Arc::new(GithubProvider::new(config)),
        ProviderKind::Discord => Arc::new(DiscordProvider::new(config)),
    }
}

/// Shared outbound client. Redirects stay off so the token endpoint
/// cannot bounce the exchange elsewhere.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(USER_AGENT)
        .build()
}
