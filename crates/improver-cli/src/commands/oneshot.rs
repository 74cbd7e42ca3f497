//! Single-request commands that call the services in-process.

use anyhow::Result;
use improver_core::PromptBackend;
use improver_core::config::RootConfig;

pub async fn generate(config: &RootConfig, prompt: &str) -> Result<()> {
    let backend = improver_execution::local_backend(config);
    println!("{}", backend.generate_response(prompt).await?);
    Ok(())
}

pub async fn improve(
    config: &RootConfig,
    prompt: &str,
    feedback: &str,
    thumbs_up: Option<bool>,
) -> Result<()> {
    let backend = improver_execution::local_backend(config);
    println!("{}", backend.improve_prompt(prompt, feedback, thumbs_up).await?);
    Ok(())
}

pub async fn analyze(config: &RootConfig, original: &str, improved: &str) -> Result<()> {
    let backend = improver_execution::local_backend(config);
    println!("{}", backend.analyze_changes(original, improved).await?);
    Ok(())
}
