use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{sessions::session_not_found, JsonBody};
use crate::{
    error::Result,
    models::{
        employee::{Employee, EmployeeSelection, SelectEmployeesRequest},
        scope::ScopeSelection,
    },
    roster::session::SessionView,
    RosterApiType, SessionStore,
};

/// Employees of the company, or of one sub-department, from the directory.
pub async fn directory(
    State(roster_api): State<RosterApiType>,
    Query(scope): Query<ScopeSelection>,
) -> Result<Json<Vec<Employee>>> {
    let scope = scope.resolve()?;
    let employees = roster_api.list_employees(&scope).await?;
    Ok(Json(employees))
}

/// Replace the session's employee multi-select.
pub async fn select(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<SelectEmployeesRequest>,
) -> Result<Json<SessionView>> {
    req.validate()?;

    let mut sessions = sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.select_employees(EmployeeSelection::from_ids(
        req.employee_ids.into_iter().map(|e| e.trim().to_string()),
    ));

    Ok(Json(session.view()))
}
