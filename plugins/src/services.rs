//! ServicesFactory implementation: builds every collaborator from config so the CLI can share them.
use deploy_core::api::{AppConfig, ConfigError, Services, ServicesFactory};

use crate::factory;

pub struct PluginServicesFactory;

impl Default for PluginServicesFactory {
    fn default() -> Self {
        Self
    }
}

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, ConfigError> {
        if !std::path::Path::new(&cfg.source_dir).is_dir() {
            return Err(ConfigError::Validation(format!(
                "source_dir is not a directory: {}",
                cfg.source_dir
            )));
        }
        Ok(Services {
            builder: factory::build_builder(cfg),
            catalog: factory::build_catalog(cfg),
            project: factory::build_project(cfg),
            vcs: factory::build_vcs(cfg),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_source_dir() {
        let cfg = AppConfig {
            source_dir: "/definitely/not/here/3b9d".into(),
            ..AppConfig::default()
        };
        let err = PluginServicesFactory.build_services(&cfg).err().unwrap();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[tokio::test]
    async fn built_services_drive_the_proxy() {
        let root = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            source_dir: root.path().display().to_string(),
            ..AppConfig::default()
        };
        let services = PluginServicesFactory.build_services(&cfg).unwrap();
        let proxy = deploy_core::api::ActionProxy::new(services);

        // no dist/ yet, so the catalog swap fails and latches the proxy
        let res = proxy.call("catalog.to", &[]).await;
        assert!(!res.success);
        assert_eq!(res.message, "failed to move build output into project directory");
        assert!(proxy.is_blocked().await);
    }
}
