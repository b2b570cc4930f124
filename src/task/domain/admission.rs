//! Read-only admission context attached to a task.

use serde::{Deserialize, Serialize};

/// Patient admission a task belongs to.
///
/// The board only reads this context for searching, ward filtering, and
/// display; lifecycle transitions never modify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Patient display name.
    pub patient_name: String,
    /// Bed label, if a bed is allocated.
    pub bed: Option<String>,
    /// Ward name, if the admission is placed on a ward.
    pub ward: Option<String>,
}

impl Admission {
    /// Creates admission context for the named patient.
    #[must_use]
    pub fn new(patient_name: impl Into<String>) -> Self {
        Self {
            patient_name: patient_name.into(),
            bed: None,
            ward: None,
        }
    }

    /// Sets the bed label.
    #[must_use]
    pub fn with_bed(mut self, bed: impl Into<String>) -> Self {
        self.bed = Some(bed.into());
        self
    }

    /// Sets the ward name.
    #[must_use]
    pub fn with_ward(mut self, ward: impl Into<String>) -> Self {
        self.ward = Some(ward.into());
        self
    }
}
