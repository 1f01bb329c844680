use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::{scope::OrgScope, shift::Shift};
use crate::roster::rejection::RosterRejection;

/// Inclusive date range, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

#[derive(Deserialize)]
struct RawDateRange {
    from: Date,
    to: Date,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = RosterRejection;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.from, raw.to)
    }
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Result<Self, RosterRejection> {
        if from > to {
            return Err(RosterRejection::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn days(&self) -> i64 {
        (self.to - self.from).whole_days() + 1
    }
}

/// A staged, not yet submitted roster instruction: one shift for a snapshot
/// of employees over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub shift: Shift,
    pub scope: OrgScope,
    pub employees: Vec<String>,
    pub date_range: DateRange,
}

/// Correlates every row produced by one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generated rows never repeat on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    None,
}

/// One employee on one shift over one date range, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub batch_id: BatchId,
    pub shift_id: String,
    pub company_id: String,
    pub department_id: Option<String>,
    pub sub_department_id: Option<String>,
    pub employee_id: String,
    pub from_date: Date,
    pub to_date: Date,
    pub recurrence: Recurrence,
    pub note: String,
}

/// Immutable snapshot handed to the roster API in a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterBatch {
    pub batch_id: BatchId,
    pub rows: Vec<RosterRow>,
}

impl RosterBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Canonical roster entry as read back from the roster API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRecord {
    pub id: Option<String>,
    pub batch_id: Option<String>,
    pub shift_id: String,
    pub shift_code: Option<String>,
    pub shift_name: Option<String>,
    pub company_id: Option<String>,
    pub department_id: Option<String>,
    pub sub_department_id: Option<String>,
    pub employee_id: String,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub note: Option<String>,
}

/// Review line for one staged assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub index: usize,
    pub shift_id: String,
    pub shift_code: String,
    pub shift_name: String,
    pub scope: String,
    pub company_wide: bool,
    pub employee_count: usize,
    pub from_date: Date,
    pub to_date: Date,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StagedSummary {
    pub assignments: Vec<AssignmentSummary>,
    pub total_rows: usize,
}
