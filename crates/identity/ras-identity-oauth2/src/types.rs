//! OAuth2 value types.

use crate::error::{OAuth2Error, OAuth2Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Decoded JSON object returned by a provider endpoint
pub type JsonMap = serde_json::Map<String, Value>;

/// Request parameters sent to a provider endpoint
pub type Parameters = BTreeMap<String, String>;

/// Access token issued by the token endpoint.
///
/// Wraps the raw parameters of the token response. The bearer value lives under
/// `access_token`; everything else the provider returned is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonMap", into = "JsonMap")]
pub struct AccessToken {
    value: String,
    parameters: JsonMap,
}

impl AccessToken {
    /// Build a token from a decoded token response.
    ///
    /// Fails if `access_token` is missing or not a string.
    pub fn from_parameters(parameters: JsonMap) -> OAuth2Result<Self> {
        let value = match parameters.get("access_token") {
            Some(Value::String(value)) => value.clone(),
            Some(_) => {
                return Err(OAuth2Error::InvalidTokenResponse(
                    "access_token is not a string".to_string(),
                ));
            }
            None => {
                return Err(OAuth2Error::InvalidTokenResponse(
                    "missing access_token".to_string(),
                ));
            }
        };

        Ok(Self { value, parameters })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn token_type(&self) -> Option<&str> {
        self.parameters.get("token_type").and_then(Value::as_str)
    }

    /// Lifetime in seconds. Some providers send this as a string.
    pub fn expires_in(&self) -> Option<u64> {
        match self.parameters.get("expires_in")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.parameters.get("refresh_token").and_then(Value::as_str)
    }

    pub fn scope(&self) -> Option<&str> {
        self.parameters.get("scope").and_then(Value::as_str)
    }

    pub fn id_token(&self) -> Option<&str> {
        self.parameters.get("id_token").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    pub fn parameters(&self) -> &JsonMap {
        &self.parameters
    }
}

impl TryFrom<JsonMap> for AccessToken {
    type Error = OAuth2Error;

    fn try_from(parameters: JsonMap) -> Result<Self, Self::Error> {
        Self::from_parameters(parameters)
    }
}

impl From<AccessToken> for JsonMap {
    fn from(token: AccessToken) -> Self {
        token.parameters
    }
}

/// Profile data returned by a provider's user info endpoint.
///
/// Field names are provider-defined, so the raw map is kept and the common
/// ones are exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserData {
    attributes: JsonMap,
}

impl UserData {
    pub fn new(attributes: JsonMap) -> Self {
        Self { attributes }
    }

    /// User identifier. Accepts both `id` (Google v1) and `sub` (OpenID Connect),
    /// numeric ids are rendered as strings.
    pub fn id(&self) -> Option<String> {
        match self.attributes.get("id").or_else(|| self.attributes.get("sub"))? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn picture(&self) -> Option<&str> {
        self.get_str("picture")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn attributes(&self) -> &JsonMap {
        &self.attributes
    }

    pub fn into_attributes(self) -> JsonMap {
        self.attributes
    }
}

impl From<JsonMap> for UserData {
    fn from(attributes: JsonMap) -> Self {
        Self::new(attributes)
    }
}
