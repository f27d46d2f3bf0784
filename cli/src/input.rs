//! Parsing of command lines typed at the prompt.

use thiserror::Error;

pub const HELP: &str = "\
commands:
  load                   fetch all products and show the first page
  more                   append the next page
  add <title> | <body>   create a product
  edit <id>              change a product's title and body
  delete <id>            delete a product
  search [text]          search as you type; blank restores the list
  list                   reprint what is shown
  help                   this text
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Load,
    More,
    Add { title: String, body: String },
    Edit(u64),
    Delete(u64),
    Search(String),
    List,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs a numeric product id")]
    BadId { command: &'static str },
}

pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "" => Ok(Input::Nothing),
        "load" => Ok(Input::Load),
        "more" => Ok(Input::More),
        "add" => {
            let (title, body) = rest.split_once('|').unwrap_or((rest, ""));
            Ok(Input::Add {
                title: title.trim().to_string(),
                body: body.trim().to_string(),
            })
        }
        "edit" => parse_id("edit", rest).map(Input::Edit),
        "delete" => parse_id("delete", rest).map(Input::Delete),
        "search" => Ok(Input::Search(rest.to_string())),
        "list" => Ok(Input::List),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(InputError::Unknown(other.to_string())),
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<u64, InputError> {
    rest.trim().parse().map_err(|_| InputError::BadId { command })
}
