//! Console commands typed into the view's command line.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Show the demo scene
    Demo,
    /// Reset the camera and show the demo scene
    Reset,
    /// Clear the status log
    Clear,
    /// Write node positions to the configured file
    Save,
    /// Re-read the outline currently shown
    Reload,
    /// Import an outline file
    Load(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`; type `help` for available commands")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl Command {
    pub const HELP: &'static str = "Available commands: help, demo, reset, clear, save, reload, load <path>";
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (input, ""),
        };
        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "help" => Ok(Command::Help),
            "demo" => Ok(Command::Demo),
            "reset" => Ok(Command::Reset),
            "clear" => Ok(Command::Clear),
            "save" => Ok(Command::Save),
            "reload" => Ok(Command::Reload),
            "load" if rest.is_empty() => Err(CommandError::MissingArgument("load")),
            // path keeps its case
            "load" => Ok(Command::Load(PathBuf::from(rest))),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Help => f.write_str("help"),
            Command::Demo => f.write_str("demo"),
            Command::Reset => f.write_str("reset"),
            Command::Clear => f.write_str("clear"),
            Command::Save => f.write_str("save"),
            Command::Reload => f.write_str("reload"),
            Command::Load(p) => write!(f, "load {}", p.display()),
        }
    }
}
