pub mod config_service;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use config_service::ConfigService;
pub use secret_service::EnvSecretService;
