//! Wiring shared by the binaries: configuration, credentials and the
//! in-process backend.

use improver_application::LocalBackend;
use improver_core::Result;
use improver_core::config::RootConfig;
use improver_infrastructure::{ConfigService, EnvSecretService};
use improver_interaction::OpenAiGateway;
use std::path::PathBuf;
use std::sync::Arc;

/// Loads `config.toml` (or `path` when given) with environment overrides.
pub fn load_config(path: Option<PathBuf>) -> Result<RootConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    service.load()
}

/// Builds a backend that calls the OpenAI API directly.
///
/// The credential is resolved once here; a missing key is not an error
/// until a completion is attempted.
pub fn local_backend(config: &RootConfig) -> LocalBackend {
    let secrets = Arc::new(EnvSecretService::from_env());
    let gateway = OpenAiGateway::new(secrets, config.model.name.clone())
        .with_base_url(config.openai.base_url.clone());
    LocalBackend::new(Arc::new(gateway), config.model.clone())
}
