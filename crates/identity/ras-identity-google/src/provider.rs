use async_trait::async_trait;
use ras_identity_oauth2::{
    AUTHORIZATION_CODE_GRANT, AccessToken, CurrentRequest, HttpClient, HttpResponse, JsonMap,
    OAuth2Result, Parameters, Provider, UserData, parse_json_response,
};
use tracing::debug;

pub const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/token";
pub const USER_INFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

pub const PROFILE_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.profile";
pub const EMAIL_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";

/// Google OAuth2 provider.
///
/// Stateless; client credentials live in the
/// [`ProviderConfig`](ras_identity_oauth2::ProviderConfig) of the client using it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleProvider;

#[async_trait]
impl Provider for GoogleProvider {
    fn provider_id(&self) -> &str {
        "google"
    }

    fn authorization_endpoint(&self) -> &str {
        AUTHORIZATION_ENDPOINT
    }

    fn token_endpoint(&self) -> &str {
        TOKEN_ENDPOINT
    }

    fn user_info_endpoint(&self) -> &str {
        USER_INFO_ENDPOINT
    }

    fn scope_delimiter(&self) -> &str {
        " "
    }

    fn default_scopes(&self) -> Vec<String> {
        vec![PROFILE_SCOPE.to_string(), EMAIL_SCOPE.to_string()]
    }

    /// Google requires the code exchange to repeat the redirect URI of the
    /// authorization step, which is the URL the callback arrived on.
    fn grant_type_extra_parameters(
        &self,
        request: &dyn CurrentRequest,
        grant_type: &str,
        _base_parameters: &Parameters,
    ) -> Parameters {
        let mut extra = Parameters::new();
        if grant_type == AUTHORIZATION_CODE_GRANT {
            extra.insert("redirect_uri".to_string(), request.current_url());
        }
        extra
    }

    async fn exchange_code_for_token(
        &self,
        http: &dyn HttpClient,
        parameters: &Parameters,
    ) -> OAuth2Result<HttpResponse> {
        http.post_form(TOKEN_ENDPOINT, parameters).await
    }

    fn parse_token_response(&self, response: &HttpResponse) -> OAuth2Result<JsonMap> {
        parse_json_response(response)
    }

    fn build_access_token(&self, parameters: JsonMap) -> OAuth2Result<AccessToken> {
        AccessToken::from_parameters(parameters)
    }

    async fn fetch_user_data(
        &self,
        http: &dyn HttpClient,
        token: &AccessToken,
    ) -> OAuth2Result<UserData> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("access_token", token.value())
            .finish();

        let response = http.get(&format!("{USER_INFO_ENDPOINT}?{query}")).await?;
        let user = UserData::new(parse_json_response(&response)?);

        debug!("Fetched Google user info with {} fields", user.attributes().len());
        Ok(user)
    }
}
