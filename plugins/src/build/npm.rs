use anyhow::Result;
use async_trait::async_trait;
use deploy_core::api::{Builder, CommandSpec, NpmConfig};

use crate::exec::run_ok;

/// Builds the project with `npm run <script>` in the source directory.
pub struct NpmBuilder {
    cfg: NpmConfig,
    source_dir: String,
    capture_bytes: usize,
}

impl NpmBuilder {
    pub fn new(cfg: NpmConfig, source_dir: String, capture_bytes: usize) -> Self {
        Self {
            cfg,
            source_dir,
            capture_bytes,
        }
    }

    fn spec(&self, args: &[String]) -> CommandSpec {
        let mut argv = vec!["run".to_string(), self.cfg.build_script.clone()];
        if !args.is_empty() {
            // npm only hands arguments after `--` to the script
            argv.push("--".to_string());
            argv.extend(args.iter().cloned());
        }
        CommandSpec::new(&self.cfg.bin)
            .args(argv)
            .cwd(&self.source_dir)
    }
}

#[async_trait]
impl Builder for NpmBuilder {
    async fn build(&self, args: &[String]) -> Result<bool> {
        run_ok(&self.spec(args), self.capture_bytes, "npm.build").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(bin: &str) -> NpmBuilder {
        NpmBuilder::new(
            NpmConfig {
                bin: bin.to_string(),
                build_script: "build".to_string(),
            },
            ".".to_string(),
            4096,
        )
    }

    #[test]
    fn forwards_args_after_separator() {
        let spec = builder("npm").spec(&["--mode".into(), "production".into()]);
        assert_eq!(spec.program, "npm");
        assert_eq!(spec.args, vec!["run", "build", "--", "--mode", "production"]);
        assert_eq!(spec.cwd.as_deref(), Some("."));
    }

    #[test]
    fn no_separator_without_args() {
        assert_eq!(builder("npm").spec(&[]).args, vec!["run", "build"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides_outcome() {
        assert!(builder("true").build(&[]).await.unwrap());
        assert!(!builder("false").build(&[]).await.unwrap());
    }

    #[tokio::test]
    async fn missing_binary_is_error() {
        assert!(builder("no-such-npm-7c2e").build(&[]).await.is_err());
    }
}
