//! Line-oriented commands typed at the prompt.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use portal_logging::portal_debug;

use super::app::AppEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    SetProfile(String),
    SetDesc(String),
    SetExp(String),
    SetTechs(String),
    /// Submit the create form.
    Add,
    /// Submit the search form, optionally replacing the search box first.
    Search(Option<String>),
    /// Replace the search box without submitting.
    SetSearch(String),
    ShowAll,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line. Field values keep their whitespace except for the
/// single space separating them from the keyword.
pub fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let (keyword, rest) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, Some(rest)),
        None => (line, None),
    };
    let value = || rest.unwrap_or_default().to_string();

    let command = match keyword.to_ascii_lowercase().as_str() {
        "profile" => UserCommand::SetProfile(value()),
        "desc" => UserCommand::SetDesc(value()),
        "exp" => UserCommand::SetExp(value()),
        "techs" => UserCommand::SetTechs(value()),
        "add" => UserCommand::Add,
        "search" => UserCommand::Search(rest.map(ToOwned::to_owned)),
        "find" => UserCommand::SetSearch(value()),
        "all" => UserCommand::ShowAll,
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" => UserCommand::Quit,
        _ => UserCommand::Unknown(line.to_string()),
    };
    Some(command)
}

/// Reads stdin on a background thread and forwards parsed commands.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(command) = parse_command(&line) {
                if tx.send(AppEvent::Command(command)).is_err() {
                    return;
                }
            }
        }
        portal_debug!("stdin closed");
        let _ = tx.send(AppEvent::InputClosed);
    });
}
