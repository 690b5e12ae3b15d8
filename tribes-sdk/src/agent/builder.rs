use super::config::Config;
use super::TribesAgent;
use tribes_api::agent::Agent;
use tribes_api::tribes_http::ApiClient;
#[cfg(feature = "default-client")]
use tribes_http_client::reqwest::ReqwestClient;

/// A builder for creating a [`TribesAgent`].
pub struct TribesAgentBuilder<T>
where
    T: ApiClient + Send + Sync,
{
    config: Config,
    client: T,
}

impl<T> TribesAgentBuilder<T>
where
    T: ApiClient + Send + Sync,
{
    /// Create a new builder with the given client.
    pub fn new(client: T) -> Self {
        Self { config: Config::default(), client }
    }
}

impl<T> TribesAgentBuilder<T>
where
    T: ApiClient + Send + Sync,
{
    /// Set the configuration for the agent.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
    /// Set the client for the agent.
    ///
    /// Returns a new builder with the client set.
    pub fn client<T0>(self, client: T0) -> TribesAgentBuilder<T0>
    where
        T0: ApiClient + Send + Sync,
    {
        TribesAgentBuilder { config: self.config, client }
    }
    /// Build a [`TribesAgent`] using the configured options.
    pub fn build(self) -> TribesAgent<T> {
        let agent = Agent::new(self.client);
        agent.configure_endpoint(self.config.endpoint);
        agent.configure_csrf_token(self.config.csrf_token);
        TribesAgent::new(agent, self.config.github_handle)
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "default-client")))]
#[cfg(feature = "default-client")]
impl Default for TribesAgentBuilder<ReqwestClient> {
    /// Create a new builder with the default client.
    fn default() -> Self {
        Self::new(ReqwestClient::new(Config::default().endpoint))
    }
}
