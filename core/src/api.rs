//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `deploy_core::api` instead of reaching into internal modules.

pub use crate::action::Action;
pub use crate::config::{
    AppConfig, CatalogConfig, CommandConfig, GitConfig, LoggingConfig, NpmConfig, PipelineConfig,
    PipelineStep, ProjectConfig,
};
pub use crate::context::AppContext;
pub use crate::error::{CliError, ConfigError, RunnerError};
pub use crate::proxy::{ActionProxy, CallResult, GateState, BLOCKED_MESSAGE, SUCCESS_MESSAGE};
pub use crate::runner::{run_command, CommandOutput, CommandSpec};
pub use crate::services::{
    Builder, Catalog, ProjectControl, Services, ServicesFactory, VersionControl,
};
