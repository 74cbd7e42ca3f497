//! Terminal rendering of a session.

use colored::Colorize;
use improver_application::orchestrator::{Notice, SessionState};
use improver_core::Version;

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Validation(message) => println!("{}", message.yellow()),
            Notice::Alert(message) => println!("{}", format!("Error: {message}").red()),
        }
    }
}

fn rating(version: &Version) -> &'static str {
    match version.thumbs_up {
        Some(true) => " [+]",
        Some(false) => " [-]",
        None => "",
    }
}

fn print_version(label: &str, version: &Version, prompt: &str) {
    println!(
        "{}",
        format!("── {label}{} ({})", rating(version), version.id).bright_magenta()
    );
    println!("{}", "Prompt:".bold());
    for line in prompt.lines() {
        println!("  {}", line.green());
    }
    println!("{}", "Response:".bold());
    for line in version.response.lines() {
        println!("  {}", line.bright_blue());
    }
}

pub fn print_state(state: &SessionState) {
    let Some(current) = &state.current_version else {
        println!("{}", "No session. Type a prompt to start.".bright_black());
        return;
    };
    println!(
        "{}",
        format!("Session: {} ({} in history)", state.phase, state.history.len()).bright_black()
    );
    print_version("Current", current, &current.prompt);

    match &state.improved_version {
        Some(improved) => {
            let label = if state.is_prompt_edited {
                "Improved (edited)"
            } else {
                "Improved"
            };
            let prompt = if state.is_prompt_edited {
                &state.edited_improved_prompt
            } else {
                &improved.prompt
            };
            println!();
            print_version(label, improved, prompt);
        }
        None => println!(
            "{}",
            "No improved version. /accept to generate one.".bright_black()
        ),
    }

    if !state.changes_analysis.is_empty() {
        println!("{}", "Changes:".bold());
        for line in state.changes_analysis.lines() {
            println!("  {}", line.yellow());
        }
    }
    if !state.feedback.is_empty() {
        println!("{}", format!("Pending feedback: {}", state.feedback).cyan());
    }
    println!();
}

pub fn print_history(state: &SessionState) {
    if state.history.is_empty() {
        println!("{}", "History is empty.".bright_black());
        return;
    }
    for (index, version) in state.history.iter().enumerate() {
        let first_line = version.prompt.lines().next().unwrap_or_default();
        println!(
            "{} {}{} {}",
            format!("{:>3}.", index + 1).bright_black(),
            version.timestamp.format("%H:%M:%S"),
            rating(version),
            first_line
        );
    }
}
