use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::{sessions::session_not_found, JsonBody};
use crate::{
    error::Result,
    models::{
        roster::{BatchId, DateRange, RosterBatch, StagedSummary},
        scope::ScopeSelection,
    },
    AppState, SessionStore,
};

#[derive(Debug, Deserialize)]
pub struct StageRequest {
    #[serde(flatten)]
    pub scope: ScopeSelection,
    pub from: Date,
    pub to: Date,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub batch_id: BatchId,
    pub rows: usize,
}

pub async fn list(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<StagedSummary>> {
    let sessions = sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.summary()))
}

/// Commit the current shift selection for the selected employees.
pub async fn stage(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<StageRequest>,
) -> Result<Json<StagedSummary>> {
    let date_range = DateRange::new(req.from, req.to)?;

    let mut sessions = sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    let staged = session.stage(&req.scope, date_range)?.len();

    tracing::info!(session_id = %id, staged, "Assignments staged");
    Ok(Json(session.summary()))
}

pub async fn unstage(
    State(sessions): State<SessionStore>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<StagedSummary>> {
    let mut sessions = sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.unstage(index)?;
    Ok(Json(session.summary()))
}

pub async fn clear(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<StagedSummary>> {
    let mut sessions = sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.clear_staged();
    Ok(Json(session.summary()))
}

/// The rows a submission would send right now, without sending them.
pub async fn preview(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<RosterBatch>> {
    let sessions = sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.snapshot_rows()))
}

/// Expand the staged list and send it to the roster API as one batch. The
/// session lock is released before the network call, and the session refuses
/// another submission until this one comes back.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>> {
    let submission = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.begin_submission()?
    };

    let sent = state.roster_api.create_roster_batch(&submission.batch).await;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id);
    if let Err(e) = sent {
        if let Some(session) = session {
            session.abort_submission(&submission);
        }
        return Err(e.into());
    }

    tracing::info!(
        session_id = %id,
        batch_id = %submission.batch.batch_id,
        rows = submission.batch.len(),
        "Roster batch submitted"
    );
    if let Some(session) = session {
        session.finish_submission(&submission);
    }

    Ok(Json(SubmitResponse {
        batch_id: submission.batch.batch_id,
        rows: submission.batch.len(),
    }))
}
