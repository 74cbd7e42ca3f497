use anyhow::{Context, Result};
use improver_core::config::RootConfig;
use improver_server::AppState;

pub async fn run(config: RootConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or(config.server.bind.clone());
    let backend = improver_execution::local_backend(&config);
    improver_server::serve(&bind, AppState::new(backend))
        .await
        .with_context(|| format!("Server on {bind} stopped"))
}
