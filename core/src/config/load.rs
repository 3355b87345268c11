use std::path::Path;

use crate::error::ConfigError;

use super::types::{AppConfig, PipelineConfig};

pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Loads config from `path`, or from `deploy.toml` in the working directory
/// when no path is given. A missing default file yields the built-in defaults;
/// a missing explicit file is an error.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            parse_str(&read(p)?)?
        }
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() {
                parse_str(&read(p)?)?
            } else {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                AppConfig::default()
            }
        }
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    cfg.expand_paths();
    validate(&cfg)?;
    Ok(cfg)
}

pub fn parse_str(s: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(s).map_err(ConfigError::Parse)
}

/// Reads a standalone pipeline file: a list of `[[steps]]` tables.
pub fn load_pipeline(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    toml::from_str::<PipelineConfig>(&read(path)?).map_err(ConfigError::Parse)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("DEPLOY_SOURCE_DIR") {
        cfg.source_dir = v;
    }
    if let Some(v) = non_blank("DEPLOY_PROJECT_DIR") {
        cfg.catalog.project_dir = v;
    }
    if let Some(v) = non_blank("DEPLOY_GIT_BRANCH") {
        cfg.git.branch = v;
    }
    if let Some(v) = non_blank("DEPLOY_LOG_LEVEL") {
        cfg.logging.level = v;
    }
}

fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.capture_bytes == 0 {
        return Err(ConfigError::Validation(
            "capture_bytes must be greater than 0".into(),
        ));
    }
    if cfg.npm.bin.trim().is_empty() {
        return Err(ConfigError::Validation("npm.bin must not be empty".into()));
    }
    if cfg.git.bin.trim().is_empty() {
        return Err(ConfigError::Validation("git.bin must not be empty".into()));
    }
    for (name, cmd) in [
        ("project.start", &cfg.project.start),
        ("project.restart", &cfg.project.restart),
        ("project.replace_version", &cfg.project.replace_version),
    ] {
        if let Some(cmd) = cmd {
            if cmd.program.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{name}.program must not be empty"
                )));
            }
        }
    }
    Ok(())
}
