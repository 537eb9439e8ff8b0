use std::path::PathBuf;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use triage_queue::{Dispatcher, Outcome};

/// Hospital triage priority queue - interactive console
#[derive(Parser, Debug)]
#[command(name = "triage", version, about)]
struct Args {
    /// Command script to execute before going interactive
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Suppress the welcome and goodbye banners
    #[arg(long)]
    quiet: bool,
}

fn welcome() {
    println!("***** Welcome to the hospital triage system *****");
    println!("Enter command line or type \"help\" to display command list.");
}

fn goodbye() {
    println!();
    println!("Thank you for using the triage system!!");
    println!("GoodBye!");
}

fn main() -> rustyline::Result<()> {
    // Diagnostics go to stderr so they never mix with command replies
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut dispatcher = Dispatcher::new();

    if !args.quiet {
        welcome();
    }

    if let Some(script) = &args.load {
        if let Outcome::Continue(text) = dispatcher.process_line(&format!("load {}", script.display())) {
            println!("{text}");
        }
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("\ntriage> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                match dispatcher.process_line(&line) {
                    Outcome::Continue(text) if !text.is_empty() => println!("{text}"),
                    Outcome::Continue(_) => {}
                    Outcome::Quit => break,
                }
            }
            // Ctrl-C / Ctrl-D end the session like `quit`
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    if !args.quiet {
        goodbye();
    }
    Ok(())
}
