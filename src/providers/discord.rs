use super::{OAuthProvider, ProviderConfig, ProviderKind};
use crate::error::OAuthError;
use crate::models::UserInfo;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

const AVATAR_CDN: &str = "https://cdn.discordapp.com/avatars";

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
    avatar: Option<String>,
    email: Option<String>,
}

/// Discord returns a bare avatar hash; users without one get an empty avatar.
fn avatar_url(user_id: &str, avatar_hash: Option<&str>) -> String {
    match avatar_hash {
        Some(hash) => format!("{AVATAR_CDN}/{user_id}/{hash}"),
        None => String::new(),
    }
}

pub struct DiscordProvider {
    config: ProviderConfig,
}

impl DiscordProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OAuthProvider for DiscordProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<UserInfo, OAuthError> {
        let res = http
            .get(self.config.profile_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?
            .error_for_status()?;

        let data = res.bytes().await?;
        let user: DiscordUser = serde_json::from_slice(&data)?;

        Ok(UserInfo {
            avatar: avatar_url(&user.id, user.avatar.as_deref()),
            email: user.email.unwrap_or_default(),
            display_name: user.username,
            access_token: access_token.to_string(),
            provider: ProviderKind::Discord,
        })
    }
}
