use std::sync::{Arc, RwLock};
use tribes_http::http::{Request, Response};
use tribes_http::{ApiClient, HttpClient};

/// Wraps an [`ApiClient`] with a configurable endpoint and CSRF token.
pub struct Client<T> {
    endpoint: RwLock<String>,
    csrf_token: RwLock<Option<String>>,
    inner: Arc<T>,
}

impl<T> Client<T>
where
    T: ApiClient + Send + Sync,
{
    pub fn new(client: T) -> Self {
        Self {
            endpoint: RwLock::new(client.base_uri()),
            csrf_token: RwLock::new(None),
            inner: Arc::new(client),
        }
    }
    pub fn configure_endpoint(&self, endpoint: String) {
        *self.endpoint.write().expect("failed to write endpoint") = endpoint;
    }
    pub fn configure_csrf_token(&self, token: Option<String>) {
        *self.csrf_token.write().expect("failed to write csrf token") = token;
    }
    pub fn get_endpoint(&self) -> String {
        self.endpoint.read().expect("failed to read endpoint").clone()
    }
    pub fn get_csrf_token(&self) -> Option<String> {
        self.csrf_token.read().expect("failed to read csrf token").clone()
    }
}

impl<T> HttpClient for Client<T>
where
    T: HttpClient + Send + Sync,
{
    async fn send_http(
        &self,
        request: Request<Vec<u8>>,
    ) -> core::result::Result<Response<Vec<u8>>, Box<dyn std::error::Error + Send + Sync + 'static>>
    {
        self.inner.send_http(request).await
    }
}

impl<T> ApiClient for Client<T>
where
    T: ApiClient + Send + Sync,
{
    fn base_uri(&self) -> String {
        self.get_endpoint()
    }
    async fn csrf_token(&self) -> Option<String> {
        self.get_csrf_token()
    }
}
