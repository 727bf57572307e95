//! HTTP transport used to talk to provider endpoints.

use crate::error::{OAuth2Error, OAuth2Result};
use crate::types::Parameters;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Raw response from a provider endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client the OAuth2 flow issues its requests through.
///
/// Implementations report connection failures and non-success statuses as
/// transport errors; only successful responses are returned.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `params` as an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &str, params: &Parameters) -> OAuth2Result<HttpResponse>;

    async fn get(&self, url: &str) -> OAuth2Result<HttpResponse>;
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout_seconds: u64) -> OAuth2Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn into_response(url: &str, response: reqwest::Response) -> OAuth2Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        let response = HttpResponse::new(status, body);
        let url = redact_url(url);

        if !response.is_success() {
            error!("Request to {} failed with status {}", url, status);
            return Err(OAuth2Error::HttpStatus {
                status,
                url,
                body: response.body,
            });
        }

        debug!("Request to {} returned status {}", url, status);
        Ok(response)
    }
}

/// Strip the query and fragment, which may carry an access token.
fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}

fn transport_error(err: reqwest::Error) -> OAuth2Error {
    OAuth2Error::TransportError(err.without_url())
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_form(&self, url: &str, params: &Parameters) -> OAuth2Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(transport_error)?;
        Self::into_response(url, response).await
    }

    async fn get(&self, url: &str) -> OAuth2Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;
        Self::into_response(url, response).await
    }
}
