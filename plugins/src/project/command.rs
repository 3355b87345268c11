use anyhow::Result;
use async_trait::async_trait;
use deploy_core::api::{CommandConfig, CommandSpec, ProjectConfig, ProjectControl};

use crate::exec::run_ok;

/// Process lifecycle driven by configured shell commands (pm2, systemctl, ...).
pub struct CommandProject {
    cfg: ProjectConfig,
    source_dir: String,
    capture_bytes: usize,
}

impl CommandProject {
    pub fn new(cfg: ProjectConfig, source_dir: String, capture_bytes: usize) -> Self {
        Self {
            cfg,
            source_dir,
            capture_bytes,
        }
    }

    async fn run(&self, label: &str, cmd: Option<&CommandConfig>, args: &[String]) -> Result<bool> {
        let Some(cmd) = cmd else {
            tracing::warn!(label, "no command configured");
            return Ok(false);
        };
        let spec = CommandSpec::new(&cmd.program)
            .args(cmd.args.iter().cloned())
            .args(args.iter().cloned())
            .cwd(&self.source_dir);
        run_ok(&spec, self.capture_bytes, label).await
    }
}

#[async_trait]
impl ProjectControl for CommandProject {
    async fn start(&self, args: &[String]) -> Result<bool> {
        self.run("project.start", self.cfg.start.as_ref(), args).await
    }

    async fn restart(&self, args: &[String]) -> Result<bool> {
        self.run("project.restart", self.cfg.restart.as_ref(), args)
            .await
    }

    async fn replace_version(&self, args: &[String]) -> Result<bool> {
        self.run(
            "project.replaceVersion",
            self.cfg.replace_version.as_ref(),
            args,
        )
        .await
    }
}
