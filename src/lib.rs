//! # Triage Queue
//!
//! A deterministic hospital triage priority queue engine.
//!
//! ## Design Principles
//!
//! - **Stable priority**: patients are served by urgency code, FIFO within
//!   the same urgency (unique arrival numbers break every tie)
//! - **O(log n) operations**: admit and serve are single heap traversals;
//!   peek and size are O(1)
//! - **Flat storage**: the heap is one dense `Vec`; parent/child hops are
//!   index arithmetic, not pointer chasing
//! - **No I/O in the engine**: reading commands and printing tables live in
//!   the dispatcher; the queue is synchronous and single-threaded
//!
//! ## Architecture
//!
//! ```text
//! [REPL / scripts / CSV replay] --> [Dispatcher] --> [TriageQueue (min-heap)]
//!                                        |
//!                                 [Rendered text]
//! ```

pub mod admissions;
pub mod command;
pub mod dispatcher;
pub mod patient;
pub mod queue;

// Re-exports for convenience
pub use admissions::{read_admissions, AdmissionRow};
pub use command::{Command, TriageError};
pub use dispatcher::{Dispatcher, Outcome, HELP};
pub use patient::{Patient, Urgency};
pub use queue::TriageQueue;
