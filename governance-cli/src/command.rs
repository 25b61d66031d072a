//! Console command parsing

use std::str::FromStr;

use governance_lib::dto::Uid;

use crate::error::ConsoleError;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(usize),
    Refresh,
    Reset,
    /// Empty text clears the filter.
    Filter(String),
    Json,
    Bands,
    Select(Uid),
    Edit,
    Rename(String),
    Save,
    Cancel,
    Delete,
    Add(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(parse_page(rest)?),
            "refresh" => Command::Refresh,
            "reset" => Command::Reset,
            "filter" => Command::Filter(rest.to_string()),
            "json" => Command::Json,
            "bands" => Command::Bands,
            "select" => Command::Select(parse_uid(rest)?),
            "edit" => Command::Edit,
            "rename" => Command::Rename(required(rest, "rename", "a new name")?),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" => Command::Delete,
            "add" => Command::Add(required(rest, "add", "a band name")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ConsoleError::UnknownCommand(line.to_string())),
        };
        Ok(command)
    }
}

fn required(rest: &str, command: &'static str, expected: &'static str) -> Result<String, ConsoleError> {
    if rest.is_empty() {
        return Err(ConsoleError::MissingArgument { command, expected });
    }
    Ok(rest.to_string())
}

fn parse_page(rest: &str) -> Result<usize, ConsoleError> {
    let rest = required(rest, "page", "a page number")?;
    rest.parse().map_err(|_| ConsoleError::InvalidArgument {
        what: "page number",
        value: rest,
    })
}

fn parse_uid(rest: &str) -> Result<Uid, ConsoleError> {
    let rest = required(rest, "select", "a band uid")?;
    rest.parse().map_err(|_| ConsoleError::InvalidArgument {
        what: "uid",
        value: rest,
    })
}

pub const HELP: &str = "\
next | prev | page N | refresh | reset     move through identities
filter TEXT                                 filter by name (empty clears)
json                                        print the page as grid JSON
bands                                       list score bands
select UID | edit | rename NAME | save      edit a band
cancel | delete | add NAME                  discard, delete, or add a band
quit";
