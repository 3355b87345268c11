use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::proxy::ActionProxy;
use crate::services::{Services, ServicesFactory};

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services: Services,
}

impl AppContext {
    pub fn new(cfg: AppConfig, factory: &dyn ServicesFactory) -> Result<Self, ConfigError> {
        let services = factory.build_services(&cfg)?;
        Ok(Self { cfg, services })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    /// Starts a deployment session: a fresh proxy with an open gate.
    pub fn proxy(&self) -> ActionProxy {
        ActionProxy::new(self.services.clone())
    }
}
