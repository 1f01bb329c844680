use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    roster::{session::SessionView, RosterSession},
    evict_expired, RosterApiType, SessionStore, SessionTtl,
};

pub(crate) fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Roster session {} not found", id))
}

/// Start a roster-building session with a freshly loaded shift catalog.
/// Sessions past their TTL are dropped first.
#[tracing::instrument(name = "Create roster session", skip_all)]
pub async fn create(
    State(sessions): State<SessionStore>,
    State(roster_api): State<RosterApiType>,
    State(SessionTtl(ttl)): State<SessionTtl>,
) -> Result<Json<SessionView>> {
    let catalog = roster_api.list_shifts().await?;
    let session = RosterSession::new(catalog);
    let view = session.view();

    tracing::info!(session_id = %session.id, shifts = session.catalog().len(), "Roster session created");
    let mut sessions = sessions.write().await;
    evict_expired(&mut sessions, session.created_at, ttl);
    sessions.insert(session.id, session);

    Ok(Json(view))
}

pub async fn get_one(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let sessions = sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.view()))
}

pub async fn discard(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
