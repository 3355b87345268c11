pub mod build;
pub mod catalog;
mod exec;
pub mod factory;
pub mod project;
pub mod services;
pub mod vcs;

pub use services::PluginServicesFactory;
