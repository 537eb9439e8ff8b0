//! Dispatcher - executes parsed commands against a triage queue.
//!
//! Owns all user-facing text; the queue itself never does I/O. Scripts
//! (`load`) run line by line through the same path as typed input.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::command::{Command, TriageError};
use crate::patient::Patient;
use crate::queue::TriageQueue;

/// Fixed waiting-list header
const LIST_HEADER: &str = "  Arrival #   Priority Code   Patient Name\n\
                           +-----------+---------------+--------------+\n";

/// Command menu shown by `help`
pub const HELP: &str = "\
add <priority-code> <patient-name>
            Adds the patient to the triage system.
            <priority-code> must be one of the 4 accepted priority codes:
                1. immediate 2. emergency 3. urgent 4. minimal
            <patient-name>: patient's full legal name (may contain spaces)
next        Announces the patient to be seen next. Takes into account the
            type of emergency and the patient's arrival order.
peek        Displays the patient that is next in line, but keeps in queue
list        Displays the list of all patients that are still waiting
            in the order that they have arrived.
load <file> Reads the file and executes the command on each line
help        Displays this menu
quit        Exits the program";

/// Result of processing one input line
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going; text to show the user (may be empty)
    Continue(String),
    /// `quit` was entered
    Quit,
}

/// Runs commands against one queue and renders the replies.
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: TriageQueue,
}

impl Dispatcher {
    /// Create a dispatcher over a fresh, empty queue
    pub fn new() -> Self {
        Self {
            queue: TriageQueue::new(),
        }
    }

    /// The queue under dispatch
    pub fn queue(&self) -> &TriageQueue {
        &self.queue
    }

    /// Process one input line as typed at the prompt.
    ///
    /// Parse and execution errors become user-facing diagnostics; nothing
    /// here ends the session except an explicit `quit`.
    pub fn process_line(&mut self, line: &str) -> Outcome {
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(err) => {
                warn!(%err, "rejected input");
                return Outcome::Continue(format!("Error: {err}."));
            }
        };
        debug!(?cmd, "dispatch");
        match cmd {
            Command::Quit => Outcome::Quit,
            other => Outcome::Continue(self.run(other)),
        }
    }

    /// Execute a non-quit command and render the reply.
    fn run(&mut self, cmd: Command) -> String {
        match cmd {
            Command::Help => HELP.to_string(),
            Command::Add { urgency, name } => {
                let reply = format!("Added patient \"{name}\" to the priority system");
                self.queue.add(Patient::new(name, urgency));
                reply
            }
            Command::Peek => match self.queue.peek_next() {
                Ok(patient) => format!(
                    "Highest priority patient to be called next: {}",
                    patient.name()
                ),
                Err(_) => "No patients waiting.".to_string(),
            },
            Command::Next => match self.queue.remove_next() {
                Ok(patient) => format!("This patient will now be seen: {}", patient.name()),
                Err(_) => "No patients waiting.".to_string(),
            },
            Command::List => {
                let mut out = format!("# patients waiting: {}\n\n", self.queue.len());
                out.push_str(LIST_HEADER);
                out.push_str(&self.queue.render());
                out
            }
            Command::Load(path) => self.exec_script(&path),
            // Handled by process_line; nothing to render here
            Command::Quit => String::new(),
        }
    }

    /// Execute a command script: every line is echoed and dispatched as if
    /// typed at the prompt. Lines already executed stay applied even if a
    /// later line fails; a `quit` inside a script is ignored so a script
    /// cannot end the session.
    fn exec_script(&mut self, path: &Path) -> String {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(source) => {
                let err = TriageError::ScriptUnavailable {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(%err, path = %path.display(), "load failed");
                return format!("Error: {err}.");
            }
        };

        let mut out = String::new();
        for line in contents.lines() {
            let _ = write!(out, "\ntriage> {line}");
            match self.process_line(line) {
                Outcome::Continue(text) if !text.is_empty() => {
                    let _ = write!(out, "\n{text}");
                }
                Outcome::Continue(_) => {}
                Outcome::Quit => debug!("quit inside script ignored"),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(dispatcher: &mut Dispatcher, line: &str) -> String {
        match dispatcher.process_line(line) {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit for {line:?}"),
        }
    }

    #[test]
    fn test_add_announces_patient() {
        let mut d = Dispatcher::new();
        assert_eq!(
            reply(&mut d, "add emergency Jane Smith"),
            "Added patient \"Jane Smith\" to the priority system"
        );
        assert_eq!(d.queue().len(), 1);
    }

    #[test]
    fn test_peek_and_next_on_empty_queue() {
        let mut d = Dispatcher::new();
        assert_eq!(reply(&mut d, "peek"), "No patients waiting.");
        assert_eq!(reply(&mut d, "next"), "No patients waiting.");
        assert!(d.queue().is_empty());
    }

    #[test]
    fn test_peek_keeps_patient_in_queue() {
        let mut d = Dispatcher::new();
        reply(&mut d, "add minimal Dana");
        reply(&mut d, "add urgent Eve");
        assert_eq!(
            reply(&mut d, "peek"),
            "Highest priority patient to be called next: Eve"
        );
        assert_eq!(d.queue().len(), 2);
    }

    #[test]
    fn test_next_serves_in_priority_order() {
        let mut d = Dispatcher::new();
        reply(&mut d, "add immediate Alice");
        reply(&mut d, "add emergency Bob");
        reply(&mut d, "add immediate Carl");

        assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Alice");
        assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Carl");
        assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Bob");
        assert_eq!(reply(&mut d, "next"), "No patients waiting.");
    }

    #[test]
    fn test_list_renders_count_header_and_rows() {
        let mut d = Dispatcher::new();
        reply(&mut d, "add urgent John Doe");
        let listing = reply(&mut d, "list");
        assert!(listing.starts_with("# patients waiting: 1\n\n"));
        assert!(listing.contains("  Arrival #   Priority Code   Patient Name\n"));
        assert!(listing.contains("+-----------+---------------+--------------+\n"));
        assert!(listing.ends_with("\t1\t\t  urgent\t\t  John Doe\n"));
    }

    #[test]
    fn test_list_on_empty_queue() {
        let mut d = Dispatcher::new();
        let listing = reply(&mut d, "list");
        assert!(listing.starts_with("# patients waiting: 0\n\n"));
        assert!(listing.ends_with("+-----------+---------------+--------------+\n"));
    }

    #[test]
    fn test_invalid_priority_is_rejected_without_enqueue() {
        let mut d = Dispatcher::new();
        assert_eq!(
            reply(&mut d, "add critical John"),
            "Error: invalid priority code: critical."
        );
        assert!(d.queue().is_empty());
    }

    #[test]
    fn test_diagnostics_do_not_mutate_state() {
        let mut d = Dispatcher::new();
        assert_eq!(reply(&mut d, ""), "Error: no command given.");
        assert_eq!(reply(&mut d, "add"), "Error: no priority code given.");
        assert_eq!(reply(&mut d, "add urgent"), "Error: no patient name given.");
        assert_eq!(
            reply(&mut d, "discharge Bob"),
            "Error: unrecognized command: discharge."
        );
        assert!(d.queue().is_empty());
    }

    #[test]
    fn test_quit_ends_session() {
        let mut d = Dispatcher::new();
        assert_eq!(d.process_line("quit"), Outcome::Quit);
    }

    #[test]
    fn test_help_shows_menu() {
        let mut d = Dispatcher::new();
        let text = reply(&mut d, "help");
        assert!(text.contains("add <priority-code> <patient-name>"));
        assert!(text.contains("quit        Exits the program"));
    }

    #[test]
    fn test_load_missing_file() {
        let mut d = Dispatcher::new();
        assert_eq!(
            reply(&mut d, "load no-such-file.txt"),
            "Error: could not open file."
        );
        assert!(d.queue().is_empty());
    }
}
