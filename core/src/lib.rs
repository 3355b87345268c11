pub mod action;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod proxy;
pub mod runner;
pub mod services;

pub use context::AppContext;
