//! Command language for the terminal host.
//!
//! File operations use colon commands; cell operations are bare words. One
//! line of input parses to one command, or to nothing.

use std::path::PathBuf;

use crate::state::CellPosition;

#[derive(Clone, Debug, PartialEq)]
pub enum ReplCommand {
    /// :w - stage the sheet for upload through the store
    Write,
    /// :w <path> - export the workbook to a file
    WriteTo(PathBuf),
    /// :w! - stage for upload even when read-only
    ForceWrite,
    /// :wq - stage for upload, then quit
    WriteQuit,
    /// :q - quit (refused while dirty)
    Quit,
    /// :q! - quit, discarding changes
    ForceQuit,
    /// :e <path> - open a workbook for editing
    Edit(PathBuf),
    /// :view <path> or :vi <path> - open a workbook read-only
    View(PathBuf),
    /// :new - start a blank sheet
    New,
    /// :reset - discard the sheet, back to the chooser
    Reset,
    /// select <ref> - select a cell by reference (B2)
    Select(CellPosition),
    /// set <text> - replace the edit buffer
    Input(String),
    /// commit - commit the edit and deselect
    Commit,
    /// show - render the grid viewport
    Show,
    /// help
    Help,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix(':') {
            return Self::parse_file_command(rest);
        }

        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, Some(arg)),
            None => (input, None),
        };

        match command {
            "select" => CellPosition::parse_reference(arg?).map(ReplCommand::Select),
            // `set` alone clears the buffer
            "set" => Some(ReplCommand::Input(arg.unwrap_or_default().to_string())),
            "commit" | "enter" => Some(ReplCommand::Commit),
            "show" => Some(ReplCommand::Show),
            "help" | "?" => Some(ReplCommand::Help),
            _ => None,
        }
    }

    fn parse_file_command(rest: &str) -> Option<Self> {
        let mut parts = rest.splitn(2, ' ');
        let command = parts.next()?;
        let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

        match command {
            "w" if arg.is_none() => Some(ReplCommand::Write),
            "w" => arg.map(PathBuf::from).map(ReplCommand::WriteTo),
            "w!" => Some(ReplCommand::ForceWrite),
            "wq" => Some(ReplCommand::WriteQuit),
            "q" => Some(ReplCommand::Quit),
            "q!" => Some(ReplCommand::ForceQuit),
            "e" | "edit" => arg.map(PathBuf::from).map(ReplCommand::Edit),
            "vi" | "view" => arg.map(PathBuf::from).map(ReplCommand::View),
            "new" => Some(ReplCommand::New),
            "reset" => Some(ReplCommand::Reset),
            _ => None,
        }
    }
}
