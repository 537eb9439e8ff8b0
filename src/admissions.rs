//! Admission-log ingestion.
//!
//! Bulk admissions arrive as CSV exports with one row per patient:
//! `name,urgency,admitted_at`. Rows convert into patients ready for the
//! queue; priority still comes exclusively from `(urgency, arrival order)`
//! and the source timestamp is informational.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::command::TriageError;
use crate::patient::{Patient, Urgency};

/// One row of an admissions CSV export
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionRow {
    /// Patient's full legal name
    pub name: String,
    /// Keyword (`immediate`, ...) or numeric code (`1`-`4`)
    pub urgency: String,
    /// Wall-clock admission time recorded by the source system, if any
    #[serde(default)]
    pub admitted_at: Option<DateTime<Utc>>,
}

impl AdmissionRow {
    /// Convert the raw row into a patient ready for admission.
    ///
    /// # Errors
    /// `InvalidPriorityCode` for an unrecognized urgency field,
    /// `MissingArgument` for a blank name. Bad rows are never enqueued.
    pub fn to_patient(&self) -> Result<Patient, TriageError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TriageError::MissingArgument("patient name"));
        }
        let urgency: Urgency = self.urgency.trim().parse()?;
        Ok(Patient::new(name, urgency))
    }
}

/// Read all rows from a CSV source with a `name,urgency,admitted_at` header.
pub fn read_admissions<R: Read>(reader: R) -> csv::Result<Vec<AdmissionRow>> {
    let mut reader = csv::Reader::from_reader(reader);
    reader.deserialize().collect()
}
