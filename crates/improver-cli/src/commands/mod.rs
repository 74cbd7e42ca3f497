pub mod oneshot;
pub mod serve;

use anyhow::Result;
use improver_core::config::RootConfig;

/// Prints the configuration after file and environment overrides.
pub fn show_config(config: &RootConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
