//! OAuth2 client driving the authorization-code flow for one provider.

use crate::AUTHORIZATION_CODE_GRANT;
use crate::config::ProviderConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::provider::Provider;
use crate::request::CurrentRequest;
use crate::types::{AccessToken, Parameters, UserData};
use std::sync::Arc;
use tracing::{debug, error, info};
use url::Url;

/// OAuth2 client for a single provider
pub struct OAuth2Client<P> {
    provider: Arc<P>,
    config: ProviderConfig,
    http_client: Arc<dyn HttpClient>,
}

impl<P> Clone for OAuth2Client<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
            http_client: Arc::clone(&self.http_client),
        }
    }
}

impl<P: Provider> OAuth2Client<P> {
    /// Create a client that talks to the provider over `reqwest`.
    pub fn new(provider: P, config: ProviderConfig) -> OAuth2Result<Self> {
        let http_client = ReqwestHttpClient::new(config.http_timeout_seconds)?;
        Ok(Self::with_http_client(provider, config, Arc::new(http_client)))
    }

    pub fn with_http_client(
        provider: P,
        config: ProviderConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
            http_client,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Scopes sent with the authorization request
    pub fn scopes(&self) -> Vec<String> {
        match &self.config.scopes {
            Some(scopes) => scopes.clone(),
            None => self.provider.default_scopes(),
        }
    }

    /// Build the URL the user is redirected to for consent.
    ///
    /// `state` is passed through unchanged; checking it on the way back is left
    /// to the caller.
    pub fn authorization_url(&self, state: Option<&str>) -> OAuth2Result<Url> {
        let mut url = Url::parse(self.provider.authorization_endpoint())?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("client_id", &self.config.client_id);
            params.append_pair("redirect_uri", &self.config.redirect_uri);
            params.append_pair("scope", &self.scopes().join(self.provider.scope_delimiter()));
            if let Some(state) = state {
                params.append_pair("state", state);
            }
            params.append_pair("response_type", "code");
        }

        debug!(
            "Generated authorization URL for provider {}",
            self.provider.provider_id()
        );
        Ok(url)
    }

    /// Exchange a grant for an access token.
    ///
    /// The provider's extra parameters for `grant_type` are merged over the base
    /// parameters before the request is sent.
    pub async fn access_token(
        &self,
        request: &dyn CurrentRequest,
        code: &str,
        grant_type: &str,
    ) -> OAuth2Result<AccessToken> {
        let mut params = Parameters::from([
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("grant_type".to_string(), grant_type.to_string()),
            ("code".to_string(), code.to_string()),
        ]);
        let extra = self
            .provider
            .grant_type_extra_parameters(request, grant_type, &params);
        params.extend(extra);

        let response = self
            .provider
            .exchange_code_for_token(self.http_client.as_ref(), &params)
            .await
            .inspect_err(|e| error!("Token exchange failed: {}", e))?;

        let parameters = self.provider.parse_token_response(&response)?;
        let token = self.provider.build_access_token(parameters)?;

        info!(
            "Successfully exchanged {} grant with provider {}",
            grant_type,
            self.provider.provider_id()
        );
        Ok(token)
    }

    /// Exchange the authorization code carried by a callback request.
    pub async fn access_token_from_callback(
        &self,
        request: &dyn CurrentRequest,
    ) -> OAuth2Result<AccessToken> {
        if let Some(error) = request.query_param("error") {
            let description = request
                .query_param("error_description")
                .unwrap_or_else(|| "No description".to_string());
            return Err(OAuth2Error::CallbackError(format!("{}: {}", error, description)));
        }

        let code = request
            .query_param("code")
            .filter(|code| !code.is_empty())
            .ok_or(OAuth2Error::MissingAuthorizationCode)?;

        self.access_token(request, &code, AUTHORIZATION_CODE_GRANT)
            .await
    }

    /// Fetch the profile of the user the token belongs to
    pub async fn user_data(&self, token: &AccessToken) -> OAuth2Result<UserData> {
        let user = self
            .provider
            .fetch_user_data(self.http_client.as_ref(), token)
            .await
            .inspect_err(|e| error!("User info request failed: {}", e))?;

        debug!(
            "Retrieved user data from provider {}",
            self.provider.provider_id()
        );
        Ok(user)
    }

    /// Exchange the callback's code and then fetch the user, in that order.
    pub async fn complete_callback(
        &self,
        request: &dyn CurrentRequest,
    ) -> OAuth2Result<(AccessToken, UserData)> {
        let token = self.access_token_from_callback(request).await?;
        let user = self.user_data(&token).await?;
        Ok((token, user))
    }
}
