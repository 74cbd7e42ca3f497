use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;

use improver_application::orchestrator::{Confirmation, Orchestrator};
use improver_core::PromptBackend;
use improver_interaction::RemoteBackend;

mod command;
mod helper;
mod render;

use command::{HELP, ReplCommand};
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "prompt-improver-repl")]
#[command(about = "Interactive prompt refinement session", long_about = None)]
struct Args {
    /// Use a running Prompt Improver server instead of calling the model directly
    #[arg(long, env = "PROMPT_IMPROVER_URL")]
    server: Option<String>,

    /// Path to config.toml (in-process mode only)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Asks on stdin; anything but y/yes declines.
struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, message: &str) -> bool {
        print!("{} ", format!("{message} Continue? [y/N]").bright_yellow());
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

async fn backend(args: &Args) -> Result<Arc<dyn PromptBackend>> {
    if let Some(url) = &args.server {
        let remote = RemoteBackend::new(url.clone());
        match remote.health().await {
            Ok(health) => println!(
                "{}",
                format!("Connected to {} (model {})", remote.base_url(), health.model).bright_black()
            ),
            Err(err) => println!("{}", format!("Warning: {err}").yellow()),
        }
        return Ok(Arc::new(remote));
    }

    let config = improver_execution::load_config(args.config.clone())?;
    let local = improver_execution::local_backend(&config);
    println!(
        "{}",
        format!("Calling {} directly", local.model()).bright_black()
    );
    Ok(Arc::new(local))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep stderr quiet; progress arrives through the channel.
    let mut progress = improver_execution::init_logging_with_progress("warn");
    tokio::spawn(async move {
        while let Some(event) = progress.recv().await {
            if event.level == "INFO" {
                println!("{}", format!("… {}", event.message).bright_black());
            }
        }
    });

    let mut orchestrator = Orchestrator::new(backend(&args).await?, Arc::new(StdinConfirmation));

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Prompt Improver ===".bright_magenta().bold());
    println!("{}", "Type a prompt to begin, '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let command = ReplCommand::parse(&line);
        if !matches!(command, ReplCommand::Empty) {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Help => println!("{}", HELP.bright_black()),
            ReplCommand::Unknown(input) => {
                println!("{}", format!("Unknown command: {input}").bright_black())
            }
            ReplCommand::Prompt(prompt) => {
                if orchestrator.state().has_started() {
                    println!(
                        "{}",
                        "A session is running. Use /feedback, /accept, or /reset first.".yellow()
                    );
                    continue;
                }
                let notices = orchestrator.start(&prompt).await;
                render::print_notices(&notices);
                render::print_state(orchestrator.state());
            }
            ReplCommand::Accept => {
                let notices = orchestrator.accept().await;
                render::print_notices(&notices);
                render::print_state(orchestrator.state());
            }
            ReplCommand::Reject => {
                let notices = orchestrator.reject().await;
                render::print_notices(&notices);
                render::print_state(orchestrator.state());
            }
            ReplCommand::Regenerate => {
                let notices = orchestrator.regenerate().await;
                render::print_notices(&notices);
                render::print_state(orchestrator.state());
            }
            ReplCommand::Edit(text) if text.is_empty() => {
                let state = orchestrator.state();
                if state.improved_version.is_some() {
                    println!("{}", state.edited_improved_prompt);
                } else {
                    println!("{}", "Nothing to edit.".bright_black());
                }
            }
            ReplCommand::Edit(text) => {
                orchestrator.edit_improved_prompt(text);
                if orchestrator.state().is_prompt_edited {
                    println!("{}", "Improved prompt edited. /accept to refine it.".cyan());
                }
            }
            ReplCommand::Feedback(text) => {
                orchestrator.set_feedback(text);
                println!("{}", "Feedback saved.".cyan());
            }
            ReplCommand::Rate(thumbs_up) => {
                orchestrator.rate_current(thumbs_up);
                println!("{}", "Rating saved.".cyan());
            }
            ReplCommand::Show => render::print_state(orchestrator.state()),
            ReplCommand::History => render::print_history(orchestrator.state()),
            ReplCommand::Reset => {
                orchestrator.reset();
                println!("{}", "Session cleared.".bright_black());
            }
        }
    }

    Ok(())
}
