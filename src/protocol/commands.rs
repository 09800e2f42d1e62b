//! Module `commands`
//!
//! Control protocol command parsing and the mapping from commands onto
//! file handler requests.

use crate::listing::ROOT_MARKER;
use crate::protocol::request::{Method, Request};

/// A command parsed from one control line.
///
/// Commands that need an argument carry it; a missing argument is reported
/// as `MissingArgument` so the session can answer with a syntax error.
#[derive(Debug, PartialEq)]
pub enum Command {
    User(String),
    Pass(String),
    Quit,
    Noop,
    List(Option<String>),
    Stat(String),
    Retr(String),
    Stor(String),
    Dele(String),
    Mkd(String),
    Rmd(String),
    Rnfr(String),
    Rnto(String),
    MissingArgument(String),
    Unknown(String),
}

/// Outcome of running a command, as seen by the session loop.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn failure(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Failure(reason.into()),
            message: Some(message.into()),
        }
    }
}

/// Parses a raw command line into a `Command`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    let required = |build: fn(String) -> Command| {
        if arg.is_empty() {
            Command::MissingArgument(cmd.clone())
        } else {
            build(arg.to_string())
        }
    };

    match cmd.as_str() {
        "USER" => required(Command::User),
        "PASS" => required(Command::Pass),
        "QUIT" => Command::Quit,
        "NOOP" => Command::Noop,
        "LIST" | "NLST" | "MLSD" => {
            Command::List((!arg.is_empty()).then(|| arg.to_string()))
        }
        "STAT" | "MLST" | "SIZE" | "MDTM" => required(Command::Stat),
        "RETR" => required(Command::Retr),
        "STOR" | "APPE" => required(Command::Stor),
        "DELE" => required(Command::Dele),
        "MKD" => required(Command::Mkd),
        "RMD" => required(Command::Rmd),
        "RNFR" => required(Command::Rnfr),
        "RNTO" => required(Command::Rnto),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

impl Command {
    /// The handler request for commands that map onto one directly.
    /// Rename needs both halves and is assembled by the session.
    pub fn to_request(&self) -> Option<Request> {
        let request = match self {
            Command::List(path) => {
                Request::new(Method::List, path.as_deref().unwrap_or(ROOT_MARKER))
            }
            Command::Stat(path) => Request::new(Method::Stat, path.as_str()),
            Command::Retr(path) => Request::new(Method::Get, path.as_str()),
            Command::Stor(path) => Request::new(Method::Put, path.as_str()),
            Command::Dele(path) => Request::new(Method::Remove, path.as_str()),
            Command::Mkd(path) => Request::new(Method::Mkdir, path.as_str()),
            Command::Rmd(path) => Request::new(Method::Rmdir, path.as_str()),
            _ => return None,
        };
        Some(request)
    }
}
