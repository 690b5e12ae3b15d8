//! Implementation of [`TribesAgent`] and its configuration.
mod builder;
pub mod config;

pub use self::builder::TribesAgentBuilder;
use self::config::Config;
use crate::error::Result;
use crate::ui::Context;
use std::ops::Deref;
use std::sync::RwLock;
use tribes_api::agent::Agent;
use tribes_api::tribe::{join, leader};
use tribes_api::tribes_http::ApiClient;
use tribes_api::types::{MemberId, TribeId};
#[cfg(feature = "default-client")]
use tribes_http_client::reqwest::ReqwestClient;

/// A tribes client for one signed-in (or anonymous) user.
///
/// Wraps the [`Agent`] of `tribes-api` with the user's [`Context`], and logs
/// every request it sends.
#[cfg(feature = "default-client")]
pub struct TribesAgent<T = ReqwestClient>
where
    T: ApiClient + Send + Sync,
{
    inner: Agent<T>,
    github_handle: RwLock<Option<String>>,
}

#[cfg(not(feature = "default-client"))]
pub struct TribesAgent<T>
where
    T: ApiClient + Send + Sync,
{
    inner: Agent<T>,
    github_handle: RwLock<Option<String>>,
}

#[cfg_attr(docsrs, doc(cfg(feature = "default-client")))]
#[cfg(feature = "default-client")]
impl TribesAgent {
    /// Create a new [`TribesAgentBuilder`] with the default client.
    pub fn builder() -> TribesAgentBuilder<ReqwestClient> {
        TribesAgentBuilder::default()
    }
}

impl<T> TribesAgent<T>
where
    T: ApiClient + Send + Sync,
{
    fn new(inner: Agent<T>, github_handle: Option<String>) -> Self {
        Self { inner, github_handle: RwLock::new(github_handle) }
    }
    /// Get the current configuration of the agent.
    pub fn to_config(&self) -> Config {
        Config {
            endpoint: self.get_endpoint(),
            csrf_token: self.get_csrf_token(),
            github_handle: self.github_handle.read().expect("failed to read github handle").clone(),
        }
    }
    /// The user context the page controls check before sending requests.
    pub fn context(&self) -> Context {
        Context::new(self.github_handle.read().expect("failed to read github handle").clone())
    }
    pub fn configure_github_handle(&self, github_handle: Option<String>) {
        *self.github_handle.write().expect("failed to write github handle") = github_handle;
    }
    /// Toggle the membership of the current user in `tribe`.
    pub async fn join(&self, tribe: &TribeId) -> Result<join::Output> {
        tracing::debug!(%tribe, endpoint = %self.get_endpoint(), "sending join request");
        let output = self.api.tribe.join(tribe).await?;
        tracing::debug!(%tribe, is_member = output.is_member, "join request succeeded");
        Ok(output)
    }
    /// Promote `member` to tribe leader.
    pub async fn promote_leader(&self, member: MemberId) -> Result<()> {
        tracing::debug!(%member, endpoint = %self.get_endpoint(), "sending leader request");
        self.api.tribe.leader(leader::Input { member }).await?;
        Ok(())
    }
}

impl<T> Deref for TribesAgent<T>
where
    T: ApiClient + Send + Sync,
{
    type Target = Agent<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
