use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Working tree that gets built and pushed/pulled.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Bytes of stdout/stderr kept per subprocess for diagnostics.
    #[serde(default = "default_capture_bytes")]
    pub capture_bytes: usize,

    #[serde(default)]
    pub npm: NpmConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_source_dir() -> String {
    ".".to_string()
}

fn default_capture_bytes() -> usize {
    65_536
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            capture_bytes: default_capture_bytes(),
            npm: NpmConfig::default(),
            git: GitConfig::default(),
            catalog: CatalogConfig::default(),
            project: ProjectConfig::default(),
            logging: LoggingConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Expands `~` in every path-like field.
    pub fn expand_paths(&mut self) {
        for p in [
            &mut self.source_dir,
            &mut self.catalog.build_dir,
            &mut self.catalog.project_dir,
            &mut self.catalog.backup_dir,
        ] {
            *p = shellexpand::tilde(p.as_str()).into_owned();
        }
        if let Some(dir) = self.logging.dir.as_mut() {
            *dir = shellexpand::tilde(dir.as_str()).into_owned();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpmConfig {
    #[serde(default = "default_npm_bin")]
    pub bin: String,

    #[serde(default = "default_build_script")]
    pub build_script: String,
}

fn default_npm_bin() -> String {
    "npm".to_string()
}

fn default_build_script() -> String {
    "build".to_string()
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            bin: default_npm_bin(),
            build_script: default_build_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_bin")]
    pub bin: String,

    #[serde(default = "default_git_remote")]
    pub remote: String,

    #[serde(default = "default_git_branch")]
    pub branch: String,
}

fn default_git_bin() -> String {
    "git".to_string()
}

fn default_git_remote() -> String {
    "origin".to_string()
}

fn default_git_branch() -> String {
    "master".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            bin: default_git_bin(),
            remote: default_git_remote(),
            branch: default_git_branch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Build output produced by `npm.build`.
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Directory the running project is served from.
    #[serde(default = "default_project_dir")]
    pub project_dir: String,

    /// Where the previous deployment is parked by `catalog.to`.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_build_dir() -> String {
    "dist".to_string()
}

fn default_project_dir() -> String {
    "deploy/current".to_string()
}

fn default_backup_dir() -> String {
    "deploy/backup".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            project_dir: default_project_dir(),
            backup_dir: default_backup_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Process lifecycle commands. Forwarded action args are appended to `args`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub start: Option<CommandConfig>,
    #[serde(default)]
    pub restart: Option<CommandConfig>,
    #[serde(default)]
    pub replace_version: Option<CommandConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// When set, logs are also written to a daily-rolling file here.
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_prefix() -> String {
    "deploy.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            file_prefix: default_log_file_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineStep {
    pub action: String,
    #[serde(default)]
    pub args: Vec<String>,
}
