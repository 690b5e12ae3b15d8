//! An agent bound to one user session of the web application.
mod inner;

use crate::client::Service;
use std::{ops::Deref, sync::Arc};
use tribes_http::ApiClient;

/// Sends tribe requests on behalf of a signed-in user.
///
/// The agent owns the endpoint and the CSRF token of the session, and attaches
/// the token to every request made through [`api`](Agent::api).
pub struct Agent<T>
where
    T: ApiClient + Send + Sync,
{
    inner: Arc<inner::Client<T>>,
    pub api: Service<inner::Client<T>>,
}

impl<T> Agent<T>
where
    T: ApiClient + Send + Sync,
{
    /// Create a new agent. The endpoint starts out as the base URI of `client`.
    pub fn new(client: T) -> Self {
        let inner = Arc::new(inner::Client::new(client));
        Self { inner: Arc::clone(&inner), api: Service::new(inner) }
    }
    /// Configures the base URI of the web application.
    pub fn configure_endpoint(&self, endpoint: String) {
        self.inner.configure_endpoint(endpoint);
    }
    /// Configures the anti-forgery token sent as `X-CSRFToken`.
    pub fn configure_csrf_token(&self, token: Option<String>) {
        self.inner.configure_csrf_token(token);
    }
    /// Get the current endpoint.
    pub fn get_endpoint(&self) -> String {
        self.inner.get_endpoint()
    }
    /// Get the current anti-forgery token.
    pub fn get_csrf_token(&self) -> Option<String> {
        self.inner.get_csrf_token()
    }
}

impl<T> Deref for Agent<T>
where
    T: ApiClient + Send + Sync,
{
    type Target = Service<inner::Client<T>>;

    fn deref(&self) -> &Self::Target {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tribe::leader;
    use std::sync::Mutex;
    use tribes_http::http::{Request, Response, StatusCode};
    use tribes_http::HttpClient;

    #[derive(Default)]
    struct RecordingClient {
        requests: Arc<Mutex<Vec<Request<Vec<u8>>>>>,
    }

    impl HttpClient for RecordingClient {
        async fn send_http(
            &self,
            request: Request<Vec<u8>>,
        ) -> Result<Response<Vec<u8>>, Box<dyn std::error::Error + Send + Sync + 'static>> {
            self.requests.lock().expect("lock").push(request);
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(tribes_http::http::header::CONTENT_TYPE, "application/json")
                .body(br#"{"is_member":true}"#.to_vec())?)
        }
    }

    impl ApiClient for RecordingClient {
        fn base_uri(&self) -> String {
            "http://localhost:8000".into()
        }
    }

    #[tokio::test]
    async fn attaches_csrf_token_and_endpoint() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let agent = Agent::new(RecordingClient { requests: Arc::clone(&requests) });
        assert_eq!(agent.get_endpoint(), "http://localhost:8000");
        assert_eq!(agent.get_csrf_token(), None);

        let tribe = "gitcoinco".parse().expect("valid tribe id");
        agent.tribe.join(&tribe).await.expect("join should succeed");

        agent.configure_endpoint(String::from("https://gitcoin.co"));
        agent.configure_csrf_token(Some(String::from("secret")));
        let output = agent.api.tribe.join(&tribe).await.expect("join should succeed");
        assert!(output.is_member);
        agent
            .tribe
            .leader(leader::Input { member: "7".parse().expect("valid member id") })
            .await
            .expect("leader should succeed");

        let requests = requests.lock().expect("lock");
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].uri(), "http://localhost:8000/tribe/gitcoinco/join/");
        assert!(requests[0].headers().get("x-csrftoken").is_none());
        assert_eq!(requests[1].uri(), "https://gitcoin.co/tribe/gitcoinco/join/");
        assert_eq!(requests[1].headers()["x-csrftoken"], "secret");
        assert_eq!(requests[2].uri(), "https://gitcoin.co/tribe/leader/");
        assert_eq!(requests[2].headers()["x-csrftoken"], "secret");
        assert_eq!(requests[2].body(), b"member=7");
    }
}
