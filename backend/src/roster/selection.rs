use serde::Serialize;

use super::{overlap, rejection::RosterRejection};
use crate::models::shift::Shift;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    Unselected,
    Selected,
}

/// Shifts chosen for the current assignment round, in the order they were
/// picked. No two members overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    shifts: Vec<Shift>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn state_of(&self, shift_id: &str) -> ShiftState {
        if self.shifts.iter().any(|s| s.id == shift_id) {
            ShiftState::Selected
        } else {
            ShiftState::Unselected
        }
    }

    /// Flip a shift between selected and unselected. Selecting is refused if
    /// the shift overlaps a current member; the set is then left as it was.
    pub fn toggle(&mut self, shift: &Shift) -> Result<ShiftState, RosterRejection> {
        match self.state_of(&shift.id) {
            ShiftState::Selected => {
                self.deselect(&shift.id);
                Ok(ShiftState::Unselected)
            }
            ShiftState::Unselected => {
                if let Some(conflict) = overlap::first_conflict(shift, &self.shifts) {
                    return Err(RosterRejection::OverlapRejected {
                        candidate: shift.code.clone(),
                        conflicting: conflict.code.clone(),
                    });
                }
                self.shifts.push(shift.clone());
                Ok(ShiftState::Selected)
            }
        }
    }

    pub fn deselect(&mut self, shift_id: &str) {
        self.shifts.retain(|s| s.id != shift_id);
    }

    pub fn clear(&mut self) {
        self.shifts.clear();
    }
}
