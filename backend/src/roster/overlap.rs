//! Shift admission: a candidate may join a selection only if its half-open
//! `[start, end)` interval intersects none of the selected shifts.

use time::Time;

use crate::models::shift::Shift;

pub fn minutes_since_midnight(t: Time) -> u16 {
    t.hour() as u16 * 60 + t.minute() as u16
}

/// Touching endpoints (one ends exactly when the other starts) do not overlap.
pub fn overlaps(a: &Shift, b: &Shift) -> bool {
    let (s1, e1) = (
        minutes_since_midnight(a.start_time),
        minutes_since_midnight(a.end_time),
    );
    let (s2, e2) = (
        minutes_since_midnight(b.start_time),
        minutes_since_midnight(b.end_time),
    );
    s1 < e2 && e1 > s2
}

/// First selected shift the candidate collides with, if any.
pub fn first_conflict<'a>(candidate: &Shift, current: &'a [Shift]) -> Option<&'a Shift> {
    current.iter().find(|s| overlaps(candidate, s))
}

pub fn can_admit(candidate: &Shift, current: &[Shift]) -> bool {
    first_conflict(candidate, current).is_none()
}
