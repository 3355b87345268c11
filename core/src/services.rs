//! Collaborator contracts the proxy dispatches to.
//!
//! Each method receives the forwarded action arguments verbatim and resolves to
//! `true` on success. An `Err` is treated by the proxy exactly like `false`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::ConfigError;

#[async_trait]
pub trait Builder: Send + Sync {
    async fn build(&self, args: &[String]) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Moves the build output into the project directory.
    async fn to(&self, args: &[String]) -> anyhow::Result<bool>;
    /// Restores the project directory to the deployment before the last `to`.
    async fn back(&self, args: &[String]) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait ProjectControl: Send + Sync {
    async fn start(&self, args: &[String]) -> anyhow::Result<bool>;
    async fn restart(&self, args: &[String]) -> anyhow::Result<bool>;
    async fn replace_version(&self, args: &[String]) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn push(&self, args: &[String]) -> anyhow::Result<bool>;
    async fn pull(&self, args: &[String]) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct Services {
    pub builder: Arc<dyn Builder>,
    pub catalog: Arc<dyn Catalog>,
    pub project: Arc<dyn ProjectControl>,
    pub vcs: Arc<dyn VersionControl>,
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, ConfigError>;
}
