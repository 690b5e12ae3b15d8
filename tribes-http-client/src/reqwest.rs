//! [`HttpClient`] for [reqwest].
//!
//! Requests arrive fully built by [`ApiClient::send_api()`]: absolute URI,
//! `Accept`, `Content-Type` and `X-CSRFToken` already set. This module only
//! moves bytes, so the same client serves the join and leader endpoints.
use reqwest::Client;
use std::sync::Arc;
use tribes_http::http::{Request, Response};
use tribes_http::{ApiClient, HttpClient};

/// Sends tribe requests to one web application over [`reqwest`].
///
/// `base_uri` is the site root (`https://gitcoin.co`); endpoint paths such as
/// `/tribe/{tribe}/join/` are appended to it. Clones share the connection pool.
///
/// The server ties the CSRF token to its session cookie. When the session has
/// to be carried by this client, build a [`reqwest::Client`] with a cookie
/// store and pass it to [`ReqwestClientBuilder::client()`].
#[derive(Clone)]
pub struct ReqwestClient {
    base_uri: String,
    client: Arc<Client>,
}

impl ReqwestClient {
    /// A client for the site at `base_uri` with a default [`reqwest::Client`].
    pub fn new(base_uri: impl AsRef<str>) -> Self {
        ReqwestClientBuilder::new(base_uri).build()
    }
}

/// Builds a [`ReqwestClient`] around a caller-configured [`reqwest::Client`].
pub struct ReqwestClientBuilder {
    base_uri: String,
    client: Option<Client>,
}

impl ReqwestClientBuilder {
    /// Start a builder for the site at `base_uri`.
    pub fn new(base_uri: impl AsRef<str>) -> Self {
        Self { base_uri: base_uri.as_ref().into(), client: None }
    }
    /// Use `client` (timeouts, user agent, cookie store) instead of the default one.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }
    /// Build the client. Without [`client()`](Self::client), a default one is created.
    pub fn build(self) -> ReqwestClient {
        ReqwestClient {
            base_uri: self.base_uri,
            client: Arc::new(self.client.unwrap_or_default()),
        }
    }
}

impl HttpClient for ReqwestClient {
    async fn send_http(
        &self,
        request: Request<Vec<u8>>,
    ) -> core::result::Result<Response<Vec<u8>>, Box<dyn std::error::Error + Send + Sync + 'static>>
    {
        let response = self.client.execute(request.try_into()?).await?;
        // status and headers decide between a decoded body and an error
        let mut builder = Response::builder().status(response.status());
        for (name, value) in response.headers() {
            builder = builder.header(name, value);
        }
        builder.body(response.bytes().await?.to_vec()).map_err(Into::into)
    }
}

impl ApiClient for ReqwestClient {
    fn base_uri(&self) -> String {
        self.base_uri.clone()
    }
}
