//! Configuration for the [`TribesAgent`](super::TribesAgent).
mod file;

pub use self::file::FileStore;
use crate::error::{Error, Result};
use crate::ui::Context;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Configuration data struct for the [`TribesAgent`](super::TribesAgent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The base URL of the web application.
    pub endpoint: String,
    /// The anti-forgery token of the session, sent as `X-CSRFToken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// The GitHub handle of the signed-in user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_handle: Option<String>,
}

impl Config {
    /// Loads the configuration from the provided loader.
    pub async fn load(loader: &impl Loader) -> Result<Self> {
        loader.load().await.map_err(Error::ConfigLoad)
    }
    /// Saves the configuration using the provided saver.
    pub async fn save(&self, saver: &impl Saver) -> Result<()> {
        saver.save(self).await.map_err(Error::ConfigSave)
    }
    /// The user context described by this configuration.
    pub fn context(&self) -> Context {
        Context::new(self.github_handle.clone())
    }
}

impl Default for Config {
    /// Creates a new default configuration.
    ///
    /// The default configuration uses the base URL `https://gitcoin.co`.
    fn default() -> Self {
        Self { endpoint: String::from("https://gitcoin.co"), csrf_token: None, github_handle: None }
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(
        &self,
    ) -> impl Future<
        Output = core::result::Result<Config, Box<dyn std::error::Error + Send + Sync + 'static>>,
    > + Send;
}

/// The trait for saving configuration data.
pub trait Saver {
    /// Saves the configuration data.
    fn save(
        &self,
        config: &Config,
    ) -> impl Future<
        Output = core::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>,
    > + Send;
}
