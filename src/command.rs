//! Command and error types shared by the dispatcher and its callers.
//!
//! Commands are parsed from input lines (keyboard or script files).
//! Errors are the full taxonomy of recoverable failures; none of them
//! terminate the command loop.

use std::path::PathBuf;

use thiserror::Error;

use crate::patient::Urgency;

/// Everything that can go wrong while parsing or executing a command.
#[derive(Debug, Error)]
pub enum TriageError {
    /// `peek`/`next` on an empty queue. Callers recover by telling the
    /// user nobody is waiting; queue state is untouched.
    #[error("no patients waiting")]
    EmptyQueue,

    /// Priority token is not one of the four accepted codes. The add is
    /// rejected; nothing is enqueued with a sentinel tier.
    #[error("invalid priority code: {0}")]
    InvalidPriorityCode(String),

    /// A required token was absent (priority code, patient name, file name)
    #[error("no {0} given")]
    MissingArgument(&'static str),

    /// Blank input line
    #[error("no command given")]
    EmptyInput,

    #[error("unrecognized command: {0}")]
    UnrecognizedCommand(String),

    /// Unreadable `load` script. Nothing was executed from it.
    #[error("could not open file")]
    ScriptUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Input Commands
// ============================================================================

/// A parsed top-level command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the command menu
    Help,
    /// Admit a patient with the given urgency
    Add { urgency: Urgency, name: String },
    /// Show the next patient without removing them
    Peek,
    /// Remove and announce the next patient
    Next,
    /// Show the waiting list
    List,
    /// Execute each line of a script file as a command
    Load(PathBuf),
    /// End the session
    Quit,
}

impl Command {
    /// Tokenize one input line.
    ///
    /// The command word and the priority token split on whitespace; the
    /// patient name is the remainder of the line, trimmed, so full legal
    /// names keep their interior spaces.
    pub fn parse(line: &str) -> Result<Command, TriageError> {
        let (cmd, tail) = split_token(line.trim_start());
        match cmd {
            "" => Err(TriageError::EmptyInput),
            "help" => Ok(Command::Help),
            "add" => {
                let (priority, rest) = split_token(tail);
                if priority.is_empty() {
                    return Err(TriageError::MissingArgument("priority code"));
                }
                let urgency: Urgency = priority.parse()?;
                let name = rest.trim();
                if name.is_empty() {
                    return Err(TriageError::MissingArgument("patient name"));
                }
                Ok(Command::Add {
                    urgency,
                    name: name.to_string(),
                })
            }
            "peek" => Ok(Command::Peek),
            "next" => Ok(Command::Next),
            "list" => Ok(Command::List),
            "load" => {
                let file = tail.trim();
                if file.is_empty() {
                    return Err(TriageError::MissingArgument("file name"));
                }
                Ok(Command::Load(PathBuf::from(file)))
            }
            "quit" => Ok(Command::Quit),
            other => Err(TriageError::UnrecognizedCommand(other.to_string())),
        }
    }
}

/// Split off the first whitespace-delimited token, returning it and the rest
fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("peek").unwrap(), Command::Peek);
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
        assert_eq!(Command::parse("list").unwrap(), Command::List);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            Command::parse("add urgent John Doe").unwrap(),
            Command::Add {
                urgency: Urgency::Urgent,
                name: "John Doe".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_add_trims_name() {
        assert_eq!(
            Command::parse("add minimal    Mary Jane Lee   ").unwrap(),
            Command::Add {
                urgency: Urgency::Minimal,
                name: "Mary Jane Lee".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_add_numeric_code() {
        assert_eq!(
            Command::parse("add 1 Carl").unwrap(),
            Command::Add {
                urgency: Urgency::Immediate,
                name: "Carl".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_add_missing_priority() {
        assert!(matches!(
            Command::parse("add"),
            Err(TriageError::MissingArgument("priority code"))
        ));
    }

    #[test]
    fn test_parse_add_missing_name() {
        assert!(matches!(
            Command::parse("add urgent"),
            Err(TriageError::MissingArgument("patient name"))
        ));
        assert!(matches!(
            Command::parse("add urgent    "),
            Err(TriageError::MissingArgument("patient name"))
        ));
    }

    #[test]
    fn test_parse_add_invalid_priority() {
        let err = Command::parse("add critical John").unwrap_err();
        match err {
            TriageError::InvalidPriorityCode(token) => assert_eq!(token, "critical"),
            other => panic!("expected InvalidPriorityCode, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            Command::parse("load commands.txt").unwrap(),
            Command::Load(PathBuf::from("commands.txt"))
        );
        assert!(matches!(
            Command::parse("load"),
            Err(TriageError::MissingArgument("file name"))
        ));
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(matches!(Command::parse(""), Err(TriageError::EmptyInput)));
        assert!(matches!(Command::parse("   "), Err(TriageError::EmptyInput)));
    }

    #[test]
    fn test_parse_unrecognized() {
        let err = Command::parse("discharge Bob").unwrap_err();
        match err {
            TriageError::UnrecognizedCommand(cmd) => assert_eq!(cmd, "discharge"),
            other => panic!("expected UnrecognizedCommand, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TriageError::EmptyQueue.to_string(), "no patients waiting");
        assert_eq!(
            TriageError::MissingArgument("priority code").to_string(),
            "no priority code given"
        );
        assert_eq!(TriageError::EmptyInput.to_string(), "no command given");
        assert_eq!(
            TriageError::ScriptUnavailable {
                path: PathBuf::from("x.txt"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .to_string(),
            "could not open file"
        );
    }
}
