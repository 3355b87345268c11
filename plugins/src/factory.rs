use std::sync::Arc;

use deploy_core::api::{AppConfig, Builder, Catalog, ProjectControl, VersionControl};

use crate::build::NpmBuilder;
use crate::catalog::DirCatalog;
use crate::project::CommandProject;
use crate::vcs::GitClient;

pub fn build_builder(cfg: &AppConfig) -> Arc<dyn Builder> {
    Arc::new(NpmBuilder::new(
        cfg.npm.clone(),
        cfg.source_dir.clone(),
        cfg.capture_bytes,
    ))
}

pub fn build_catalog(cfg: &AppConfig) -> Arc<dyn Catalog> {
    Arc::new(DirCatalog::new(&cfg.catalog, cfg.source_dir.clone()))
}

pub fn build_project(cfg: &AppConfig) -> Arc<dyn ProjectControl> {
    Arc::new(CommandProject::new(
        cfg.project.clone(),
        cfg.source_dir.clone(),
        cfg.capture_bytes,
    ))
}

pub fn build_vcs(cfg: &AppConfig) -> Arc<dyn VersionControl> {
    Arc::new(GitClient::new(
        cfg.git.clone(),
        cfg.source_dir.clone(),
        cfg.capture_bytes,
    ))
}
