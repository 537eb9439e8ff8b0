use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use triage_queue::{read_admissions, TriageQueue, Urgency};

/// Replay an admissions CSV into a fresh triage queue
#[derive(Parser, Debug)]
#[command(name = "replay", version, about)]
struct Args {
    /// Admissions CSV with a `name,urgency,admitted_at` header
    file: PathBuf,

    /// Serve every patient and print the full service order
    #[arg(long)]
    drain: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file = match File::open(&args.file) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Error: could not open {}: {err}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let rows = match read_admissions(file) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("Error: malformed admissions file: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut queue = TriageQueue::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in &rows {
        match row.to_patient() {
            Ok(patient) => queue.add(patient),
            Err(err) => {
                eprintln!("Warning: skipping \"{}\": {err}", row.name);
                skipped += 1;
            }
        }
    }

    println!(
        "Admitted {} patients from {} rows ({} skipped)",
        queue.len(),
        rows.len(),
        skipped
    );
    for tier in Urgency::ALL {
        let count = queue.iter().filter(|p| p.urgency() == tier).count();
        println!("  {:>9}: {count}", tier.label());
    }

    if args.drain {
        println!("\nService order:");
        while let Ok(patient) = queue.remove_next() {
            println!("  {patient}");
        }
    }

    ExitCode::SUCCESS
}
