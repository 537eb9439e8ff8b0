//! End-to-end dispatcher runs over script files (`load`).

use std::fs;

use tempfile::TempDir;

use triage_queue::{Dispatcher, Outcome};

fn reply(dispatcher: &mut Dispatcher, line: &str) -> String {
    match dispatcher.process_line(line) {
        Outcome::Continue(text) => text,
        Outcome::Quit => panic!("unexpected quit for {line:?}"),
    }
}

#[test]
fn test_load_executes_each_line() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("commands.txt");
    fs::write(
        &script,
        "add immediate Alice\nadd emergency Bob\nadd immediate Carl\n",
    )
    .unwrap();

    let mut d = Dispatcher::new();
    let out = reply(&mut d, &format!("load {}", script.display()));

    // Every line is echoed with its prompt and its reply
    assert!(out.contains("triage> add immediate Alice"));
    assert!(out.contains("Added patient \"Alice\" to the priority system"));
    assert!(out.contains("Added patient \"Carl\" to the priority system"));
    assert_eq!(d.queue().len(), 3);

    // The loaded patients serve in priority order
    assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Alice");
    assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Carl");
    assert_eq!(reply(&mut d, "next"), "This patient will now be seen: Bob");
}

#[test]
fn test_load_missing_file_reports_and_preserves_state() {
    let mut d = Dispatcher::new();
    reply(&mut d, "add urgent Dana");

    assert_eq!(
        reply(&mut d, "load definitely-not-here.txt"),
        "Error: could not open file."
    );
    assert_eq!(d.queue().len(), 1);
}

#[test]
fn test_partially_valid_script_keeps_applied_lines() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("mixed.txt");
    fs::write(
        &script,
        "add urgent Eve\nadd critical Mallory\nadd minimal Trent\n",
    )
    .unwrap();

    let mut d = Dispatcher::new();
    let out = reply(&mut d, &format!("load {}", script.display()));

    // The bad line is reported in place; lines before and after applied
    assert!(out.contains("Error: invalid priority code: critical."));
    assert_eq!(d.queue().len(), 2);
}

#[test]
fn test_quit_inside_script_is_ignored() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("quitter.txt");
    fs::write(&script, "add urgent Eve\nquit\nadd minimal Trent\n").unwrap();

    let mut d = Dispatcher::new();
    let outcome = d.process_line(&format!("load {}", script.display()));

    // A script cannot end the session, and lines after `quit` still run
    assert!(matches!(outcome, Outcome::Continue(_)));
    assert_eq!(d.queue().len(), 2);
}

#[test]
fn test_nested_load() {
    let dir = TempDir::new().unwrap();
    let inner = dir.path().join("inner.txt");
    let outer = dir.path().join("outer.txt");
    fs::write(&inner, "add immediate Alice\n").unwrap();
    fs::write(&outer, format!("add minimal Bob\nload {}\n", inner.display())).unwrap();

    let mut d = Dispatcher::new();
    let out = reply(&mut d, &format!("load {}", outer.display()));

    assert!(out.contains("Added patient \"Bob\" to the priority system"));
    assert!(out.contains("Added patient \"Alice\" to the priority system"));
    assert_eq!(d.queue().len(), 2);
    assert_eq!(d.queue().peek_next().unwrap().name(), "Alice");
}
