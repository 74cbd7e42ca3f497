use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "prompt-improver")]
#[command(about = "Prompt Improver - refine prompts side by side with their responses", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on; overrides config and PROMPT_IMPROVER_BIND
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate a model response for a prompt
    Generate { prompt: String },
    /// Improve a prompt once
    Improve {
        prompt: String,
        #[arg(long, default_value = "")]
        feedback: String,
        /// Mark the prompt as disliked
        #[arg(long)]
        thumbs_down: bool,
    },
    /// Summarize the changes between two prompts
    Analyze { original: String, improved: String },
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    improver_execution::init_logging();
    let cli = Cli::parse();
    let config = improver_execution::load_config(cli.config)?;

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(config, bind).await?,
        Commands::Generate { prompt } => commands::oneshot::generate(&config, &prompt).await?,
        Commands::Improve {
            prompt,
            feedback,
            thumbs_down,
        } => {
            let thumbs_up = thumbs_down.then_some(false);
            commands::oneshot::improve(&config, &prompt, &feedback, thumbs_up).await?
        }
        Commands::Analyze { original, improved } => {
            commands::oneshot::analyze(&config, &original, &improved).await?
        }
        Commands::ShowConfig => commands::show_config(&config)?,
    }

    Ok(())
}
