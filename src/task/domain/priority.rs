//! Priority and category classifications for nursing tasks.

use super::{ParseTaskCategoryError, ParseTaskPriorityError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical priority of a task.
///
/// Priority drives display order only; it never changes bucket membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Immediate action required.
    Stat,
    /// Action required as soon as possible.
    Urgent,
    /// High priority.
    High,
    /// Medium priority.
    Medium,
    /// Routine scheduled care.
    #[default]
    Routine,
    /// Low priority.
    Low,
    /// As needed.
    Prn,
}

impl TaskPriority {
    /// All priorities from most to least urgent.
    pub const ALL: [Self; 7] = [
        Self::Stat,
        Self::Urgent,
        Self::High,
        Self::Medium,
        Self::Routine,
        Self::Low,
        Self::Prn,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stat => "STAT",
            Self::Urgent => "URGENT",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Routine => "ROUTINE",
            Self::Low => "LOW",
            Self::Prn => "PRN",
        }
    }

    /// Returns the sort rank, where `0` is the most urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Stat => 0,
            Self::Urgent => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Routine => 4,
            Self::Low => 5,
            Self::Prn => 6,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| ParseTaskPriorityError(value.to_owned()))
    }
}

/// Kind of nursing work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    /// Medication administration.
    Medication,
    /// Vital signs observation.
    Vitals,
    /// Clinical assessment.
    Assessment,
    /// Wound care and dressings.
    WoundCare,
    /// Personal hygiene.
    Hygiene,
    /// Mobilisation and repositioning.
    Mobility,
    /// Feeding and fluid balance.
    Nutrition,
    /// Bedside procedure.
    Procedure,
    /// Patient or family education.
    Education,
    /// Discharge preparation.
    Discharge,
    /// Anything else.
    #[default]
    Other,
}

impl TaskCategory {
    /// All categories.
    pub const ALL: [Self; 11] = [
        Self::Medication,
        Self::Vitals,
        Self::Assessment,
        Self::WoundCare,
        Self::Hygiene,
        Self::Mobility,
        Self::Nutrition,
        Self::Procedure,
        Self::Education,
        Self::Discharge,
        Self::Other,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medication => "MEDICATION",
            Self::Vitals => "VITALS",
            Self::Assessment => "ASSESSMENT",
            Self::WoundCare => "WOUND_CARE",
            Self::Hygiene => "HYGIENE",
            Self::Mobility => "MOBILITY",
            Self::Nutrition => "NUTRITION",
            Self::Procedure => "PROCEDURE",
            Self::Education => "EDUCATION",
            Self::Discharge => "DISCHARGE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseTaskCategoryError(value.to_owned()))
    }
}
