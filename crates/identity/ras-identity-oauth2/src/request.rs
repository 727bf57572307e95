//! Access to the URL of the request currently being handled.

use url::Url;

/// The incoming request an OAuth2 callback arrives on.
///
/// Providers use it to rebuild the redirect URI, which must match the one sent
/// during the authorization step.
pub trait CurrentRequest: Send + Sync {
    fn scheme(&self) -> &str;

    /// Host including an explicit port, e.g. `localhost:3000`.
    fn host(&self) -> String;

    fn path(&self) -> &str;

    /// Raw query string, without the leading `?`.
    fn query(&self) -> Option<&str>;

    /// Scheme, host and path of the request; query and fragment are dropped.
    fn current_url(&self) -> String {
        format!("{}://{}{}", self.scheme(), self.host(), self.path())
    }

    /// First value of a query parameter, percent-decoded.
    fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl CurrentRequest for Url {
    fn scheme(&self) -> &str {
        Url::scheme(self)
    }

    fn host(&self) -> String {
        let host = self.host_str().unwrap_or_default();
        match self.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    fn path(&self) -> &str {
        Url::path(self)
    }

    fn query(&self) -> Option<&str> {
        Url::query(self)
    }
}
