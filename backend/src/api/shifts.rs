use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::sessions::session_not_found;
use crate::{error::Result, roster::selection::ShiftState, SessionStore};

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub shift_id: String,
    pub state: ShiftState,
    pub selected: Vec<String>,
}

/// Flip one shift's selection. Selecting a shift that overlaps the current
/// selection is rejected with `overlapping_shift`.
pub async fn toggle(
    State(sessions): State<SessionStore>,
    Path((id, shift_id)): Path<(Uuid, String)>,
) -> Result<Json<ToggleResponse>> {
    let mut sessions = sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    let state = session.toggle_shift(&shift_id)?;
    tracing::debug!(session_id = %id, %shift_id, ?state, "Shift toggled");

    Ok(Json(ToggleResponse {
        shift_id,
        state,
        selected: session
            .selection()
            .shifts()
            .iter()
            .map(|s| s.id.clone())
            .collect(),
    }))
}
