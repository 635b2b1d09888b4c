use std::str::FromStr;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use super::{Authorization, Transport};
use crate::errors::TransportError;

/// JSON-RPC over one-shot HTTP POST exchanges.
///
/// # Example
///
/// ```no_run
/// use ethrpc::{transports::Http, Client};
/// use std::str::FromStr;
///
/// let transport = Http::from_str("http://localhost:8545").unwrap();
/// let client = Client::new(transport, false);
/// ```
#[derive(Clone, Debug)]
pub struct Http {
    client: reqwest::Client,
    url: Url,
}

impl Http {
    /// Initializes a transport POSTing to the given endpoint.
    pub fn new(url: impl Into<Url>) -> Self {
        Self::new_with_client(url, reqwest::Client::new())
    }

    /// Initializes a transport that attaches the given credentials to
    /// every request.
    pub fn new_with_auth(
        url: impl Into<Url>,
        auth: Authorization,
    ) -> Result<Self, TransportError> {
        let mut auth_value = HeaderValue::from_str(&auth.to_string())?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self::new_with_client(url, client))
    }

    /// Allows customizing the transport with a caller-provided HTTP client.
    pub fn new_with_client(url: impl Into<Url>, client: reqwest::Client) -> Self {
        Self { client, url: url.into() }
    }

    /// The Url to which requests are made
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for Http {
    async fn send(&self, request: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.url.as_ref())
            .header(CONTENT_TYPE, "application/json")
            .body(request.to_owned())
            .send()
            .await?;
        Ok(response.text().await?)
    }
}

impl FromStr for Http {
    type Err = url::ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(Url::parse(src)?))
    }
}
