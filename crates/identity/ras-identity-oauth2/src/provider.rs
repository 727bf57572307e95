//! Identity provider abstraction.

use crate::error::OAuth2Result;
use crate::http::{HttpClient, HttpResponse};
use crate::request::CurrentRequest;
use crate::types::{AccessToken, JsonMap, Parameters, UserData};
use async_trait::async_trait;

/// Provider-specific half of an OAuth2 authorization-code flow.
///
/// [`OAuth2Client`](crate::OAuth2Client) owns the generic steps and calls into
/// a provider for endpoint URLs, scopes and the handling of each response.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier used in logs, e.g. `google`
    fn provider_id(&self) -> &str;

    fn authorization_endpoint(&self) -> &str;

    fn token_endpoint(&self) -> &str;

    fn user_info_endpoint(&self) -> &str;

    /// Separator used to join scopes into the `scope` parameter.
    fn scope_delimiter(&self) -> &str {
        ","
    }

    /// Scopes requested when the configuration names none.
    fn default_scopes(&self) -> Vec<String>;

    /// Extra parameters merged into the token request for `grant_type`.
    fn grant_type_extra_parameters(
        &self,
        _request: &dyn CurrentRequest,
        _grant_type: &str,
        _base_parameters: &Parameters,
    ) -> Parameters {
        Parameters::new()
    }

    /// Send the token request and return the raw response.
    async fn exchange_code_for_token(
        &self,
        http: &dyn HttpClient,
        parameters: &Parameters,
    ) -> OAuth2Result<HttpResponse>;

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
    ) -> OAuth2Result<UserData>;
}

/// Decode a response body as a JSON object.
///
/// Status codes are not inspected here; [`HttpClient`] implementations reject
/// unsuccessful responses before they reach a parser.
pub fn parse_json_response(response: &HttpResponse) -> OAuth2Result<JsonMap> {
    Ok(serde_json::from_str(&response.body)?)
}
