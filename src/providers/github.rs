use super::{OAuthProvider, ProviderConfig, ProviderKind};
use crate::error::OAuthError;
use crate::models::UserInfo;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

// Private emails and unset names come back as null.
#[derive(Debug, Deserialize)]
struct GithubUser {
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

pub struct GithubProvider {
    config: ProviderConfig,
}

impl GithubProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OAuthProvider for GithubProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<UserInfo, OAuthError> {
        let user: GithubUser = http
            .get(self.config.profile_url.clone())
            .bearer_auth(access_token)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(UserInfo {
            email: user.email.unwrap_or_default(),
            display_name: user.name.unwrap_or_default(),
            avatar: user.avatar_url.unwrap_or_default(),
            access_token: access_token.to_string(),
            provider: ProviderKind::Github,
        })
    }
}
