//! Staging of shift selections into assignments, and expansion of staged
//! assignments into submission rows. Every function here is pure: inputs are
//! borrowed and results are fresh values.

use super::{rejection::RosterRejection, selection::SelectionSet};
use crate::models::{
    roster::{
        Assignment, AssignmentSummary, BatchId, DateRange, Recurrence, RosterBatch, RosterRow,
        StagedSummary,
    },
    scope::{OrgScope, ScopeSelection},
};

/// Build one assignment per selected shift and append them to `staged`.
///
/// Checks run in order: company, department detail, employees, shifts. The
/// first failure is returned and nothing is staged.
pub fn stage(
    staged: &[Assignment],
    selection: &SelectionSet,
    scope: &ScopeSelection,
    employees: &[String],
    date_range: DateRange,
) -> Result<Vec<Assignment>, RosterRejection> {
    let scope: OrgScope = scope.resolve()?;
    if employees.is_empty() {
        return Err(RosterRejection::EmptyEmployeeSet);
    }
    if selection.is_empty() {
        return Err(RosterRejection::EmptySelection);
    }

    let mut next = Vec::with_capacity(staged.len() + selection.len());
    next.extend_from_slice(staged);
    next.extend(selection.shifts().iter().map(|shift| Assignment {
        shift: shift.clone(),
        scope: scope.clone(),
        employees: employees.to_vec(),
        date_range,
    }));

    Ok(next)
}

/// Remove the assignment at `index`.
pub fn unstage(staged: &[Assignment], index: usize) -> Result<Vec<Assignment>, RosterRejection> {
    if index >= staged.len() {
        return Err(RosterRejection::InvalidIndex {
            index,
            len: staged.len(),
        });
    }

    let mut next = staged.to_vec();
    next.remove(index);
    Ok(next)
}

/// Flatten staged assignments under a freshly generated batch id.
pub fn expand(staged: &[Assignment]) -> RosterBatch {
    expand_with(staged, BatchId::generate())
}

/// One row per (assignment, employee), grouped by assignment order and then
/// by employee order.
pub fn expand_with(staged: &[Assignment], batch_id: BatchId) -> RosterBatch {
    let rows = staged
        .iter()
        .flat_map(|a| {
            a.employees.iter().map(move |employee_id| RosterRow {
                batch_id,
                shift_id: a.shift.id.clone(),
                company_id: a.scope.company().to_string(),
                department_id: a.scope.department().map(str::to_string),
                sub_department_id: a.scope.sub_department().map(str::to_string),
                employee_id: employee_id.clone(),
                from_date: a.date_range.from,
                to_date: a.date_range.to,
                recurrence: Recurrence::None,
                note: format!("Roster for shift {} ({})", a.shift.name, a.shift.code),
            })
        })
        .collect();

    RosterBatch { batch_id, rows }
}

pub fn summarize(staged: &[Assignment]) -> StagedSummary {
    let assignments = staged
        .iter()
        .enumerate()
        .map(|(index, a)| AssignmentSummary {
            index,
            shift_id: a.shift.id.clone(),
            shift_code: a.shift.code.clone(),
            shift_name: a.shift.name.clone(),
            scope: a.scope.to_string(),
            company_wide: a.scope.is_company_wide(),
            employee_count: a.employees.len(),
            from_date: a.date_range.from,
            to_date: a.date_range.to,
            days: a.date_range.days(),
        })
        .collect();

    StagedSummary {
        assignments,
        total_rows: staged.iter().map(|a| a.employees.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{scope::ScopeMode, shift::Shift};
    use crate::roster::rejection::OrgLevel;
    use quickcheck_macros::quickcheck;
    use time::macros::{date, time};
    use uuid::Uuid;

    fn shift_x() -> Shift {
        Shift::new("x", "X", "Morning", time!(8:00), time!(12:00)).unwrap()
    }

    fn shift_y() -> Shift {
        Shift::new("y", "Y", "Afternoon", time!(12:00), time!(16:00)).unwrap()
    }

    fn january() -> DateRange {
        DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).unwrap()
    }

    fn company_wide(company: &str) -> ScopeSelection {
        ScopeSelection {
            company: Some(company.into()),
            mode: ScopeMode::CompanyWide,
            department: Some("3".into()),
            sub_department: Some("8".into()),
        }
    }

    fn scoped(company: &str, dept: &str, sub: &str) -> ScopeSelection {
        ScopeSelection {
            company: Some(company.into()),
            mode: ScopeMode::DepartmentScoped,
            department: Some(dept.into()),
            sub_department: Some(sub.into()),
        }
    }

    fn select(shifts: &[Shift]) -> SelectionSet {
        let mut set = SelectionSet::new();
        for s in shifts {
            set.toggle(s).unwrap();
        }
        set
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn stage_company_wide_snapshot() {
        let staged = stage(
            &[],
            &select(&[shift_x()]),
            &company_wide("7"),
            &ids(&["101", "102", "103"]),
            january(),
        )
        .unwrap();

        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].employees, ids(&["101", "102", "103"]));
        assert_eq!(staged[0].scope, OrgScope::CompanyWide { company: "7".into() });
        assert_eq!(staged[0].date_range, january());
    }

    #[test]
    fn stage_appends_one_assignment_per_shift() {
        let first = stage(
            &[],
            &select(&[shift_x()]),
            &company_wide("7"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();
        let second = stage(
            &first,
            &select(&[shift_x(), shift_y()]),
            &scoped("7", "2", "4"),
            &ids(&["201"]),
            january(),
        )
        .unwrap();

        assert_eq!(second.len(), 3);
        assert_eq!(second[0], first[0]);
        assert_eq!(second[1].shift.id, "x");
        assert_eq!(second[2].shift.id, "y");
    }

    #[test]
    fn stage_reports_missing_department_and_leaves_list_alone() {
        let existing = stage(
            &[],
            &select(&[shift_x()]),
            &company_wide("1"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();

        let err = stage(
            &existing,
            &select(&[shift_y()]),
            &scoped("1", "", "5"),
            &ids(&["101"]),
            january(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            RosterRejection::MissingOrgDetail {
                level: OrgLevel::Department
            }
        );
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn stage_precondition_order() {
        let empty = SelectionSet::new();
        let none: Vec<String> = Vec::new();
        let no_company = ScopeSelection::default();

        assert_eq!(
            stage(&[], &empty, &no_company, &none, january()).unwrap_err(),
            RosterRejection::MissingScope
        );
        assert_eq!(
            stage(&[], &empty, &company_wide("1"), &none, january()).unwrap_err(),
            RosterRejection::EmptyEmployeeSet
        );
        assert_eq!(
            stage(&[], &empty, &company_wide("1"), &ids(&["1"]), january()).unwrap_err(),
            RosterRejection::EmptySelection
        );
    }

    #[test]
    fn unstage_removes_exactly_one() {
        let staged = stage(
            &[],
            &select(&[shift_x(), shift_y()]),
            &company_wide("7"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();

        let after = unstage(&staged, 0).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].shift.id, "y");
    }

    #[test]
    fn unstage_out_of_range() {
        let staged = stage(
            &[],
            &select(&[shift_x(), shift_y()]),
            &company_wide("7"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();

        let err = unstage(&staged, 5).unwrap_err();
        assert_eq!(err, RosterRejection::InvalidIndex { index: 5, len: 2 });
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn expand_orders_rows_and_shares_batch() {
        let mut staged = stage(
            &[],
            &select(&[shift_x()]),
            &scoped("7", "2", "4"),
            &ids(&["101", "102"]),
            january(),
        )
        .unwrap();
        staged = stage(
            &staged,
            &select(&[shift_y()]),
            &company_wide("7"),
            &ids(&["201"]),
            january(),
        )
        .unwrap();

        let batch_id = BatchId(Uuid::nil());
        let batch = expand_with(&staged, batch_id);

        let got: Vec<(&str, &str)> = batch
            .rows
            .iter()
            .map(|r| (r.shift_id.as_str(), r.employee_id.as_str()))
            .collect();
        assert_eq!(got, [("x", "101"), ("x", "102"), ("y", "201")]);
        assert!(batch.rows.iter().all(|r| r.batch_id == batch_id));
        assert!(batch.rows.iter().all(|r| r.recurrence == Recurrence::None));

        assert_eq!(batch.rows[0].department_id.as_deref(), Some("2"));
        assert_eq!(batch.rows[0].sub_department_id.as_deref(), Some("4"));
        assert_eq!(batch.rows[2].department_id, None);
        assert_eq!(batch.rows[2].sub_department_id, None);
        assert!(batch.rows[2].note.contains("Afternoon"));
    }

    #[test]
    fn company_wide_rows_serialize_null_departments() {
        let staged = stage(
            &[],
            &select(&[shift_x()]),
            &company_wide("7"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();
        let row = serde_json::to_value(&expand(&staged).rows[0]).unwrap();
        assert!(row["department_id"].is_null());
        assert!(row["sub_department_id"].is_null());
        assert_eq!(row["from_date"], "2024-01-01");
        assert_eq!(row["recurrence"], "none");
    }

    #[test]
    fn each_expansion_gets_its_own_batch_id() {
        let staged = stage(
            &[],
            &select(&[shift_x()]),
            &company_wide("7"),
            &ids(&["101"]),
            january(),
        )
        .unwrap();
        assert_ne!(expand(&staged).batch_id, expand(&staged).batch_id);
    }

    #[test]
    fn summary_counts_rows() {
        let staged = stage(
            &[],
            &select(&[shift_x(), shift_y()]),
            &company_wide("7"),
            &ids(&["101", "102"]),
            january(),
        )
        .unwrap();
        let summary = summarize(&staged);
        assert_eq!(summary.assignments.len(), 2);
        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.assignments[1].shift_code, "Y");
        assert!(summary.assignments.iter().all(|a| a.days == 31 && a.company_wide));
    }

    #[quickcheck]
    fn expansion_cardinality(sizes: Vec<u8>) -> bool {
        let staged: Vec<Assignment> = sizes
            .iter()
            .map(|&n| Assignment {
                shift: shift_x(),
                scope: OrgScope::CompanyWide { company: "1".into() },
                employees: (0..n % 16).map(|e| e.to_string()).collect(),
                date_range: january(),
            })
            .collect();

        let expected: usize = staged.iter().map(|a| a.employees.len()).sum();
        expand(&staged).len() == expected
    }
}
