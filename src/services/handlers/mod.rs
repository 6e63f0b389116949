//! Built-in server services

pub mod common;
pub mod config_server;
pub mod gateway_server;
pub mod registry_server;

pub use config_server::ConfigServerService;
pub use gateway_server::GatewayServerService;
pub use registry_server::RegistryServerService;
