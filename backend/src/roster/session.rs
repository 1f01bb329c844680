use serde::Serialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{
    builder,
    rejection::RosterRejection,
    selection::{SelectionSet, ShiftState},
};
use crate::models::{
    employee::EmployeeSelection,
    roster::{Assignment, BatchId, DateRange, RosterBatch, StagedSummary},
    scope::ScopeSelection,
    shift::Shift,
};

/// All roster-building state for one operator. Transitions either succeed
/// and replace the affected parts, or return a rejection and change nothing.
#[derive(Debug, Clone)]
pub struct RosterSession {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    catalog: Vec<Shift>,
    selection: SelectionSet,
    employees: EmployeeSelection,
    staged: Vec<Assignment>,
    revision: u64,
    in_flight: Option<BatchId>,
}

/// Rows detached from a session for submission, tagged with the staged-list
/// revision they were taken from.
#[derive(Debug, Clone)]
pub struct Submission {
    pub batch: RosterBatch,
    pub assignments: Vec<Assignment>,
    pub revision: u64,
}

impl RosterSession {
    pub fn new(catalog: Vec<Shift>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            catalog,
            selection: SelectionSet::new(),
            employees: EmployeeSelection::default(),
            staged: Vec::new(),
            revision: 0,
            in_flight: None,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }

    pub fn submission_in_flight(&self) -> Option<BatchId> {
        self.in_flight
    }

    pub fn catalog(&self) -> &[Shift] {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn employees(&self) -> &EmployeeSelection {
        &self.employees
    }

    pub fn staged(&self) -> &[Assignment] {
        &self.staged
    }

    pub fn toggle_shift(&mut self, shift_id: &str) -> Result<ShiftState, RosterRejection> {
        let shift = self
            .catalog
            .iter()
            .find(|s| s.id == shift_id)
            .ok_or_else(|| RosterRejection::UnknownShift(shift_id.to_string()))?;
        self.selection.toggle(shift)
    }

    pub fn select_employees(&mut self, selection: EmployeeSelection) {
        self.employees = selection;
    }

    /// Stage the current shift and employee selections. On success both
    /// selections are cleared for the next round.
    pub fn stage(
        &mut self,
        scope: &ScopeSelection,
        date_range: DateRange,
    ) -> Result<&[Assignment], RosterRejection> {
        self.staged = builder::stage(
            &self.staged,
            &self.selection,
            scope,
            self.employees.ids(),
            date_range,
        )?;
        self.revision += 1;
        self.selection.clear();
        self.employees.clear();
        Ok(&self.staged)
    }

    pub fn unstage(&mut self, index: usize) -> Result<&[Assignment], RosterRejection> {
        self.staged = builder::unstage(&self.staged, index)?;
        self.revision += 1;
        Ok(&self.staged)
    }

    pub fn clear_staged(&mut self) {
        self.staged.clear();
        self.revision += 1;
    }

    pub fn summary(&self) -> StagedSummary {
        builder::summarize(&self.staged)
    }

    /// Expand the staged list as it stands now. The batch is detached from
    /// the session, so later edits cannot reach a submission in flight.
    pub fn snapshot_rows(&self) -> RosterBatch {
        builder::expand(&self.staged)
    }

    /// Snapshot for the roster API and mark it in flight. Refused when
    /// nothing is staged or another submission has not come back yet.
    pub fn begin_submission(&mut self) -> Result<Submission, RosterRejection> {
        if self.in_flight.is_some() {
            return Err(RosterRejection::SubmissionInProgress);
        }
        if self.staged.is_empty() {
            return Err(RosterRejection::NothingStaged);
        }

        let batch = self.snapshot_rows();
        self.in_flight = Some(batch.batch_id);
        Ok(Submission {
            batch,
            assignments: self.staged.clone(),
            revision: self.revision,
        })
    }

    /// Drop what a successful submission persisted. If the staged list was
    /// edited while the call was in flight, only the submitted entries go.
    pub fn finish_submission(&mut self, submission: &Submission) {
        self.release(submission);
        if self.revision == submission.revision {
            self.clear_staged();
            return;
        }

        tracing::warn!(
            session_id = %self.id,
            "Staged list changed during submission, keeping newer entries"
        );
        let mut remaining = submission.assignments.clone();
        self.staged.retain(|a| match remaining.iter().position(|s| s == a) {
            Some(i) => {
                remaining.remove(i);
                false
            }
            None => true,
        });
        self.revision += 1;
    }

    /// The roster API refused the batch. The staged list stays as it is.
    pub fn abort_submission(&mut self, submission: &Submission) {
        self.release(submission);
    }

    fn release(&mut self, submission: &Submission) {
        if self.in_flight == Some(submission.batch.batch_id) {
            self.in_flight = None;
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            shifts: self
                .catalog
                .iter()
                .map(|s| ShiftOption {
                    state: self.selection.state_of(&s.id),
                    shift: s.clone(),
                })
                .collect(),
            selected_employees: self.employees.ids().to_vec(),
            staged: self.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftOption {
    #[serde(flatten)]
    pub shift: Shift,
    pub state: ShiftState,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub shifts: Vec<ShiftOption>,
    pub selected_employees: Vec<String>,
    pub staged: StagedSummary,
}
