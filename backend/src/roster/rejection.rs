use std::fmt;

use serde::Serialize;

/// Organizational level named by [`RosterRejection::MissingOrgDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgLevel {
    Department,
    SubDepartment,
}

impl fmt::Display for OrgLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgLevel::Department => f.write_str("department"),
            OrgLevel::SubDepartment => f.write_str("sub-department"),
        }
    }
}

/// A refused state transition. The roster state is unchanged whenever one of
/// these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterRejection {
    #[error("Shift {candidate} overlaps with already selected shift {conflicting}")]
    OverlapRejected {
        candidate: String,
        conflicting: String,
    },

    #[error("Please select a company")]
    MissingScope,

    #[error("Please select a {level}, or switch to company-wide mode")]
    MissingOrgDetail { level: OrgLevel },

    #[error("No employees selected")]
    EmptyEmployeeSet,

    #[error("No shifts selected")]
    EmptySelection,

    #[error("No staged assignment at position {index} (list has {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("Date range is invalid: {from} is after {to}")]
    InvalidDateRange { from: time::Date, to: time::Date },

    #[error("Nothing is staged for submission")]
    NothingStaged,

    #[error("A submission for this session is already in progress")]
    SubmissionInProgress,

    #[error("Shift {0} is not in the shift catalog")]
    UnknownShift(String),

    #[error("Shift {shift_id} must start before it ends ({start} - {end})")]
    InvalidShiftTimes {
        shift_id: String,
        start: time::Time,
        end: time::Time,
    },
}

impl RosterRejection {
    /// Stable machine-readable reason for the UI layer.
    pub fn code(&self) -> &'static str {
        match self {
            RosterRejection::OverlapRejected { .. } => "overlapping_shift",
            RosterRejection::MissingScope => "missing_company",
            RosterRejection::MissingOrgDetail {
                level: OrgLevel::Department,
            } => "missing_department",
            RosterRejection::MissingOrgDetail {
                level: OrgLevel::SubDepartment,
            } => "missing_sub_department",
            RosterRejection::EmptyEmployeeSet => "no_employees_selected",
            RosterRejection::EmptySelection => "no_shifts_selected",
            RosterRejection::InvalidIndex { .. } => "invalid_index",
            RosterRejection::InvalidDateRange { .. } => "invalid_date_range",
            RosterRejection::NothingStaged => "nothing_staged",
            RosterRejection::SubmissionInProgress => "submission_in_progress",
            RosterRejection::UnknownShift(_) => "unknown_shift",
            RosterRejection::InvalidShiftTimes { .. } => "invalid_shift_times",
        }
    }
}
