//! Patient records and urgency codes.
//!
//! A `Patient` is ordered by `(urgency, arrival)`: more urgent first,
//! earlier arrival breaking ties within the same urgency. Arrival numbers
//! are unique, so no two patients ever compare equal and heap operations
//! are fully deterministic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::command::TriageError;

/// Medical urgency code (lower = more urgent)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Urgency {
    /// Life-threatening, seen first
    Immediate = 1,
    Emergency = 2,
    Urgent = 3,
    /// Non-urgent, seen last
    Minimal = 4,
}

impl Urgency {
    /// All four tiers, most urgent first
    pub const ALL: [Urgency; 4] = [
        Urgency::Immediate,
        Urgency::Emergency,
        Urgency::Urgent,
        Urgency::Minimal,
    ];

    /// Numeric priority code (1-4)
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Keyword form used by commands and the waiting list
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Emergency => "emergency",
            Urgency::Urgent => "urgent",
            Urgency::Minimal => "minimal",
        }
    }

    /// Map a numeric priority code back to an urgency
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Urgency::Immediate),
            2 => Some(Urgency::Emergency),
            3 => Some(Urgency::Urgent),
            4 => Some(Urgency::Minimal),
            _ => None,
        }
    }
}

impl FromStr for Urgency {
    type Err = TriageError;

    /// Accepts the four keywords or their numeric codes.
    ///
    /// Anything else is rejected outright; an unrecognized code is never
    /// admitted with a sentinel tier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "immediate" | "1" => Ok(Urgency::Immediate),
            "emergency" | "2" => Ok(Urgency::Emergency),
            "urgent" | "3" => Ok(Urgency::Urgent),
            "minimal" | "4" => Ok(Urgency::Minimal),
            other => Err(TriageError::InvalidPriorityCode(other.to_string())),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Patient
// ============================================================================

/// One queued patient.
///
/// `arrival` is 0 until the queue admits the patient; the queue assigns a
/// strictly increasing arrival number at admission and it never changes
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    name: String,
    urgency: Urgency,
    arrival: u64,
}

impl Patient {
    /// Create a patient not yet admitted (arrival number unassigned)
    pub fn new(name: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            name: name.into(),
            urgency,
            arrival: 0,
        }
    }

    /// Patient's full name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned urgency tier
    #[inline]
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Arrival number assigned at admission (0 = not yet admitted)
    #[inline]
    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    /// Set the arrival number. Called exactly once, by the queue.
    #[inline]
    pub(crate) fn assign_arrival(&mut self, arrival: u64) {
        self.arrival = arrival;
    }

    /// Tab-separated row for the waiting-list display:
    /// arrival number, priority code, name.
    pub fn row(&self) -> String {
        format!(
            "\t{}\t\t  {}\t\t  {}\n",
            self.arrival,
            self.urgency.label(),
            self.name
        )
    }
}

// Heap comparisons use only (urgency, arrival). Field-wise equality exists
// for tests and never influences ordering.
impl PartialOrd for Patient {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Patient {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (self.urgency, self.arrival).cmp(&(other.urgency, other.arrival))
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ pri = {}, arrive = {} }}",
            self.name,
            self.urgency.label(),
            self.arrival
        )
    }
}
