use anyhow::Result;
use async_trait::async_trait;
use deploy_core::api::{CommandSpec, GitConfig, VersionControl};

use crate::exec::run_ok;

/// `git push` / `git pull` in the source directory.
///
/// With no forwarded args the configured remote and branch are used.
pub struct GitClient {
    cfg: GitConfig,
    source_dir: String,
    capture_bytes: usize,
}

impl GitClient {
    pub fn new(cfg: GitConfig, source_dir: String, capture_bytes: usize) -> Self {
        Self {
            cfg,
            source_dir,
            capture_bytes,
        }
    }

    fn spec(&self, subcommand: &str, args: &[String]) -> CommandSpec {
        let tail = if args.is_empty() {
            vec![self.cfg.remote.clone(), self.cfg.branch.clone()]
        } else {
            args.to_vec()
        };
        CommandSpec::new(&self.cfg.bin)
            .args([subcommand.to_string()])
            .args(tail)
            .cwd(&self.source_dir)
    }
}

#[async_trait]
impl VersionControl for GitClient {
    async fn push(&self, args: &[String]) -> Result<bool> {
        run_ok(&self.spec("push", args), self.capture_bytes, "git.push").await
    }

    async fn pull(&self, args: &[String]) -> Result<bool> {
        run_ok(&self.spec("pull", args), self.capture_bytes, "git.pull").await
    }
}
