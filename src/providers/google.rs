use super::{OAuthProvider, ProviderConfig, ProviderKind};
use crate::error::OAuthError;
use crate::models::UserInfo;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GoogleUser {
    email: Option<String>,
    given_name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleProvider {
    config: ProviderConfig,
}

impl GoogleProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl OAuthProvider for GoogleProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn fetch_profile(
        &self,
        http: &reqwest::Client,
        access_token: &str,
    ) -> Result<UserInfo, OAuthError> {
        let user: GoogleUser = http
            .get(self.config.profile_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(UserInfo {
            email: user.email.unwrap_or_default(),
            display_name: user.given_name.unwrap_or_default(),
            avatar: user.picture.unwrap_or_default(),
            access_token: access_token.to_string(),
            provider: ProviderKind::Google,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1089",
                "email": "ada@example.com",
                "verified_email": true,
                "name": "Ada Lovelace",
                "given_name": "Ada",
                "picture": "https://lh3.googleusercontent.com/a/ada"
            })))
            .mount(&server)
            .await;
        let provider = GoogleProvider::new(mock_config(ProviderKind::Google, &server));

        let user = provider.fetch_profile(&client(), ACCESS_TOKEN).await.unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.display_name, "Ada");
        assert_eq!(user.avatar, "https://lh3.googleusercontent.com/a/ada");
        assert_eq!(user.access_token, ACCESS_TOKEN);
        assert_eq!(user.provider, ProviderKind::Google);
    }

    #[tokio::test]
    async fn test_fetch_profile_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let provider = GoogleProvider::new(mock_config(ProviderKind::Google, &server));

        let err = provider.fetch_profile(&client(), "expired").await.unwrap_err();
        assert!(matches!(err, OAuthError::ProfileFetch(_)));
    }
}
