use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use deploy_core::api::{Catalog, CatalogConfig};

use crate::exec::resolve;

/// Swaps build output in and out of the project directory on the local disk.
///
/// `to` parks the live project directory in the backup slot before copying the
/// new build in; `back` puts the parked directory back. When there was no live
/// directory to park, `to` leaves an empty marker next to the backup slot so
/// `back` returns to "nothing deployed" instead of an older backup.
pub struct DirCatalog {
    build_dir: PathBuf,
    project_dir: PathBuf,
    backup_dir: PathBuf,
    source_dir: String,
}

impl DirCatalog {
    pub fn new(cfg: &CatalogConfig, source_dir: String) -> Self {
        Self {
            build_dir: resolve(&source_dir, &cfg.build_dir),
            project_dir: resolve(&source_dir, &cfg.project_dir),
            backup_dir: resolve(&source_dir, &cfg.backup_dir),
            source_dir,
        }
    }
}

#[async_trait]
impl Catalog for DirCatalog {
    async fn to(&self, args: &[String]) -> Result<bool> {
        let build = match args.first() {
            Some(p) => resolve(&self.source_dir, p),
            None => self.build_dir.clone(),
        };
        let project = self.project_dir.clone();
        let backup = self.backup_dir.clone();

        tokio::task::spawn_blocking(move || swap_in(&build, &project, &backup))
            .await
            .context("catalog.to task panicked")?
    }

    async fn back(&self, _args: &[String]) -> Result<bool> {
        let project = self.project_dir.clone();
        let backup = self.backup_dir.clone();

        tokio::task::spawn_blocking(move || restore(&project, &backup))
            .await
            .context("catalog.back task panicked")?
    }
}

fn swap_in(build: &Path, project: &Path, backup: &Path) -> Result<bool> {
    if !build.is_dir() {
        tracing::warn!(build = %build.display(), "build output not found");
        return Ok(false);
    }

    // Whatever the slot held belongs to an older swap.
    if backup.exists() {
        std::fs::remove_dir_all(backup)
            .with_context(|| format!("remove old backup {}", backup.display()))?;
    }
    let marker = empty_marker(backup);
    if marker.exists() {
        std::fs::remove_file(&marker)
            .with_context(|| format!("remove {}", marker.display()))?;
    }

    ensure_parent(backup)?;
    if project.exists() {
        std::fs::rename(project, backup).with_context(|| {
            format!("park {} at {}", project.display(), backup.display())
        })?;
    } else {
        std::fs::write(&marker, b"")
            .with_context(|| format!("write {}", marker.display()))?;
    }

    ensure_parent(project)?;
    copy_dir(build, project)?;
    tracing::info!(
        build = %build.display(),
        project = %project.display(),
        "build output moved into project directory"
    );
    Ok(true)
}

fn restore(project: &Path, backup: &Path) -> Result<bool> {
    let marker = empty_marker(backup);
    if marker.exists() {
        if project.exists() {
            std::fs::remove_dir_all(project)
                .with_context(|| format!("remove {}", project.display()))?;
        }
        std::fs::remove_file(&marker)
            .with_context(|| format!("remove {}", marker.display()))?;
        tracing::info!(
            project = %project.display(),
            "nothing was deployed before, project directory removed"
        );
        return Ok(true);
    }
    if !backup.is_dir() {
        tracing::warn!(backup = %backup.display(), "no previous deployment to restore");
        return Ok(false);
    }
    if project.exists() {
        std::fs::remove_dir_all(project)
            .with_context(|| format!("remove {}", project.display()))?;
    }
    std::fs::rename(backup, project)
        .with_context(|| format!("restore {} from {}", project.display(), backup.display()))?;
    tracing::info!(project = %project.display(), "previous deployment restored");
    Ok(true)
}

/// `deploy/backup` -> `deploy/backup.empty`
fn empty_marker(backup: &Path) -> PathBuf {
    let mut name = backup.file_name().unwrap_or_default().to_os_string();
    name.push(".empty");
    backup.with_file_name(name)
}

fn ensure_parent(p: &Path) -> Result<()> {
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    std::fs::create_dir_all(to).with_context(|| format!("create {}", to.display()))?;
    for entry in std::fs::read_dir(from).with_context(|| format!("read {}", from.display()))? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        // follows symlinks, so a linked directory is copied as a directory
        let meta = std::fs::metadata(entry.path())
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if meta.is_dir() {
            copy_dir(&entry.path(), &dest)?;
        } else {
            std::fs::copy(entry.path(), &dest)
                .with_context(|| format!("copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}
