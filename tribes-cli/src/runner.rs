use crate::commands::Command;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs::create_dir_all;
use tribes_sdk::agent::config::{Config, FileStore};
use tribes_sdk::TribesAgent;

pub struct Runner {
    agent: TribesAgent,
    debug: bool,
    config_path: PathBuf,
}

impl Runner {
    pub async fn new(endpoint: Option<String>, debug: bool, is_login: bool) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .with_context(|| format!("No config dir: {:?}", dirs::config_dir()))?;
        let dir = config_dir.join("tribes-cli");
        create_dir_all(&dir).await?;
        let config_path = dir.join("config.json");

        let mut config = if is_login {
            Config::default()
        } else {
            Config::load(&FileStore::new(&config_path)).await.with_context(|| "Not logged in")?
        };
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }
        tracing::debug!(endpoint = %config.endpoint, path = ?config_path, "loaded config");
        let agent = TribesAgent::builder().config(config).build();
        Ok(Self { agent, debug, config_path })
    }
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Login(args) => {
                self.agent.configure_csrf_token(Some(args.csrf_token));
                self.agent.configure_github_handle(Some(args.github_handle));
                self.agent.to_config().save(&FileStore::new(&self.config_path)).await?;
                println!("Login successful! Saved config to {:?}", self.config_path);
                Ok(())
            }
            Command::Join(args) => {
                self.require_login()?;
                self.print(&self.agent.join(&args.tribe).await?)
            }
            Command::Leader(args) => {
                self.require_login()?;
                self.agent.promote_leader(args.member.clone()).await?;
                println!("{} is now a tribe leader", args.member);
                Ok(())
            }
            Command::ShowConfig => self.print(&self.agent.to_config()),
        }
    }
    fn require_login(&self) -> Result<()> {
        if self.agent.context().is_authenticated() {
            Ok(())
        } else {
            anyhow::bail!("Please login first.")
        }
    }
    fn print<T: std::fmt::Debug + Serialize>(&self, result: &T) -> Result<()> {
        if self.debug {
            println!("{:#?}", result);
        } else {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        Ok(())
    }
}
