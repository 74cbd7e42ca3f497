//! REPL input parsing.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free text: starts a session when none is running
    Prompt(String),
    Accept,
    Reject,
    Regenerate,
    /// Replace the editable improved prompt; empty shows it instead
    Edit(String),
    Feedback(String),
    Rate(Option<bool>),
    History,
    Show,
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub const COMMANDS: &[&str] = &[
    "/accept",
    "/reject",
    "/regen",
    "/edit",
    "/feedback",
    "/rate",
    "/history",
    "/show",
    "/reset",
    "/help",
    "/quit",
];

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if trimmed == "quit" || trimmed == "exit" {
            return Self::Quit;
        }
        if !trimmed.starts_with('/') {
            return Self::Prompt(trimmed.to_string());
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "/accept" | "/a" => Self::Accept,
            "/reject" | "/r" => Self::Reject,
            "/regen" | "/regenerate" => Self::Regenerate,
            "/edit" | "/e" => Self::Edit(rest.to_string()),
            "/feedback" | "/f" => Self::Feedback(rest.to_string()),
            "/rate" => match rest {
                "up" | "+" => Self::Rate(Some(true)),
                "down" | "-" => Self::Rate(Some(false)),
                "" | "clear" => Self::Rate(None),
                _ => Self::Unknown(trimmed.to_string()),
            },
            "/history" | "/h" => Self::History,
            "/show" | "/s" => Self::Show,
            "/reset" => Self::Reset,
            "/help" | "/?" => Self::Help,
            "/quit" | "/exit" | "/q" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type a prompt to start a session, then:
  /accept            accept the improved prompt (refines it when edited or commented)
  /reject            reject the improved prompt
  /regen             generate another improvement of the current prompt
  /edit <text>       replace the improved prompt text (no text shows it)
  /feedback <text>   feedback for the next improvement (no text clears it)
  /rate up|down|clear  rate the current prompt
  /show              show the current session
  /history           list earlier versions
  /reset             discard the session
  /quit              exit";
