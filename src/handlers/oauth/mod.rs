mod callback_handler;
mod login_handler;

pub use callback_handler::callback_handler;
pub use login_handler::login_handler;

use crate::models::AppState;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/{provider}/login", get(login_handler))
        .route("/auth/{provider}/callback", get(callback_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use crate::providers::test_support::*;
    use crate::services::OAuthService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STATE: &str = "pseudo-random";

    fn app(server: &MockServer) -> Router {
        let oauth = OAuthService::from_configs(
            STATE,
            client(),
            ProviderKind::ALL
                .into_iter()
                .map(|kind| mock_config(kind, server)),
        );

        routes().with_state(AppState {
            oauth: Arc::new(oauth),
        })
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let server = MockServer::start().await;

        let response = send_get(app(&server), "/auth/github/login").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with(&format!("{}/authorize", server.uri())));
        assert!(location.contains("state=pseudo-random"));
        assert!(location.contains("client_id=github-client"));
    }

    #[tokio::test]
    async fn test_login_unknown_provider() {
        let server = MockServer::start().await;

        let response = send_get(app(&server), "/auth/gitlab/login").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "unknown oauth provider: gitlab"})
        );
    }

    #[tokio::test]
    async fn test_callback_state_mismatch() {
        let server = MockServer::start().await;

        let response = send_get(app(&server), "/auth/google/callback?state=forged&code=abc").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "invalid oauth state"})
        );
    }

    #[tokio::test]
    async fn test_callback_returns_user_info() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "123",
                "username": "wumpus",
                "avatar": "abc",
                "email": "wumpus@discord.com"
            })))
            .mount(&server)
            .await;

        let uri = format!("/auth/discord/callback?state={STATE}&code={GOOD_CODE}");
        let response = send_get(app(&server), &uri).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({
                "email": "wumpus@discord.com",
                "displayName": "wumpus",
                "avatar": "https://cdn.discordapp.com/avatars/123/abc",
                "accessToken": ACCESS_TOKEN,
                "provider": "discord"
            })
        );
    }

    #[tokio::test]
    async fn test_callback_exchange_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant"
            })))
            .mount(&server)
            .await;

        let uri = format!("/auth/google/callback?state={STATE}&code=expired");
        let response = send_get(app(&server), &uri).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "code exchange failed: invalid_grant"})
        );
    }
}
