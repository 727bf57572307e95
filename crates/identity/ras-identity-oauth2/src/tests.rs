//! Integration tests for the OAuth2 client against a mock provider.

#[cfg(test)]
mod integration_tests {
    use crate::{
        AccessToken, HttpClient, HttpResponse, OAuth2Client, OAuth2Error, OAuth2Result,
        Parameters, Provider, ProviderConfig, UserData, parse_json_response,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Provider relying on the trait defaults, served by a mock server
    struct MockProvider {
        base_url: String,
        authorization_endpoint: String,
        token_endpoint: String,
        user_info_endpoint: String,
    }

    impl MockProvider {
        fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.to_string(),
                authorization_endpoint: format!("{base_url}/authorize"),
                token_endpoint: format!("{base_url}/token"),
                user_info_endpoint: format!("{base_url}/userinfo"),
            }
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn provider_id(&self) -> &str {
            "mock_provider"
        }

        fn authorization_endpoint(&self) -> &str {
            &self.authorization_endpoint
        }

        fn token_endpoint(&self) -> &str {
            &self.token_endpoint
        }

        fn user_info_endpoint(&self) -> &str {
            &self.user_info_endpoint
        }

        fn default_scopes(&self) -> Vec<String> {
            vec!["openid".to_string(), "email".to_string()]
        }

        async fn exchange_code_for_token(
            &self,
            http: &dyn HttpClient,
            parameters: &Parameters,
        ) -> OAuth2Result<HttpResponse> {
            http.post_form(self.token_endpoint(), parameters).await
        }

        async fn fetch_user_data(
            &self,
            http: &dyn HttpClient,
            token: &AccessToken,
        ) -> OAuth2Result<UserData> {
            let url = format!("{}?access_token={}", self.user_info_endpoint(), token.value());
            let response = http.get(&url).await?;
            Ok(UserData::new(parse_json_response(&response)?))
        }
    }

    async fn setup_mock_client() -> (MockServer, OAuth2Client<MockProvider>) {
        let mock_server = MockServer::start().await;
        let provider = MockProvider::new(&mock_server.uri());
        let config = ProviderConfig::new(
            "mock_client_id",
            "mock_secret",
            "http://localhost:3000/callback",
        )
        .with_http_timeout(5);

        let client = OAuth2Client::new(provider, config).unwrap();
        (mock_server, client)
    }

    fn callback_url(query: &str) -> Url {
        Url::parse(&format!("http://localhost:3000/callback?{query}")).unwrap()
    }

    #[tokio::test]
    async fn test_authorization_url_uses_provider_defaults() {
        let (_mock_server, client) = setup_mock_client().await;

        let url = client.authorization_url(Some("opaque-state")).unwrap();
        assert_eq!(url.path(), "/authorize");
        assert!(url.as_str().starts_with(&client.provider().base_url));

        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("client_id").unwrap(), "mock_client_id");
        assert_eq!(
            params.get("redirect_uri").unwrap(),
            "http://localhost:3000/callback"
        );
        // Default delimiter is a comma.
        assert_eq!(params.get("scope").unwrap(), "openid,email");
        assert_eq!(params.get("state").unwrap(), "opaque-state");
        assert_eq!(params.get("response_type").unwrap(), "code");
    }

    #[tokio::test]
    async fn test_authorization_url_with_configured_scopes_and_no_state() {
        let mock_server = MockServer::start().await;
        let config = ProviderConfig::new("id", "secret", "http://localhost/cb")
            .with_scopes(vec!["profile".to_string()]);
        let client = OAuth2Client::new(MockProvider::new(&mock_server.uri()), config).unwrap();

        assert_eq!(client.scopes(), vec!["profile".to_string()]);

        let url = client.authorization_url(None).unwrap();
        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("scope").unwrap(), "profile");
        assert!(!params.contains_key("state"));
    }

    #[tokio::test]
    async fn test_full_oauth2_flow() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=mock_auth_code"))
            .and(body_string_contains("client_id=mock_client_id"))
            .and(body_string_contains("client_secret=mock_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "mock_access_token",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(query_param("access_token", "mock_access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "12345",
                "email": "test@example.com",
                "name": "Test User"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let (token, user) = client
            .complete_callback(&callback_url("code=mock_auth_code&state=abc"))
            .await
            .unwrap();

        assert_eq!(token.value(), "mock_access_token");
        assert_eq!(token.expires_in(), Some(3600));
        assert_eq!(user.id(), Some("12345".to_string()));
        assert_eq!(user.email(), Some("test@example.com"));
        assert_eq!(user.name(), Some("Test User"));
    }

    #[tokio::test]
    async fn test_default_grant_parameters_add_nothing() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"access_token":"t"}"#),
            )
            .mount(&mock_server)
            .await;

        client
            .access_token(&callback_url("code=c"), "c", "authorization_code")
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(!body.contains("redirect_uri"));
    }

    #[tokio::test]
    async fn test_token_exchange_error_status() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "The provided authorization code is invalid"
            })))
            .mount(&mock_server)
            .await;

        let err = client
            .access_token_from_callback(&callback_url("code=invalid_code"))
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_token_exchange_malformed_response() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client
            .access_token_from_callback(&callback_url("code=test_code"))
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_token_response_without_access_token() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"token_type":"Bearer"}"#),
            )
            .mount(&mock_server)
            .await;

        let err = client
            .access_token_from_callback(&callback_url("code=test_code"))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuth2Error::InvalidTokenResponse(_)));
    }

    #[tokio::test]
    async fn test_user_info_malformed_response() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let token: AccessToken = serde_json::from_str(r#"{"access_token":"t"}"#).unwrap();
        let err = client.user_data(&token).await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_callback_errors_skip_network() {
        let (mock_server, client) = setup_mock_client().await;

        let err = client
            .access_token_from_callback(&callback_url(
                "error=access_denied&error_description=User%20declined",
            ))
            .await
            .unwrap_err();
        match err {
            OAuth2Error::CallbackError(message) => {
                assert_eq!(message, "access_denied: User declined")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = client
            .access_token_from_callback(&callback_url("state=only"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuth2Error::MissingAuthorizationCode));

        let err = client
            .complete_callback(&callback_url("code="))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuth2Error::MissingAuthorizationCode));

        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_info_not_fetched_after_failed_exchange() {
        let (mock_server, client) = setup_mock_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client.complete_callback(&callback_url("code=c")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_custom_http_client_is_used() {
        use std::sync::Arc;

        struct StaticHttpClient;

        #[async_trait]
        impl HttpClient for StaticHttpClient {
            async fn post_form(
                &self,
                _url: &str,
                _params: &Parameters,
            ) -> OAuth2Result<HttpResponse> {
                Ok(HttpResponse::new(200, r#"{"access_token":"static"}"#))
            }

            async fn get(&self, _url: &str) -> OAuth2Result<HttpResponse> {
                Ok(HttpResponse::new(200, r#"{"id":7}"#))
            }
        }

        let client = OAuth2Client::with_http_client(
            MockProvider::new("https://unused.invalid"),
            ProviderConfig::new("id", "secret", "https://app.example.com/cb"),
            Arc::new(StaticHttpClient),
        );

        let (token, user) = client
            .complete_callback(&callback_url("code=c"))
            .await
            .unwrap();
        assert_eq!(token.value(), "static");
        assert_eq!(user.id(), Some("7".to_string()));
    }
}
