use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::Result,
    models::roster::{BatchId, RosterRecord},
    RosterApiType,
};

/// Everything the roster API holds for one submitted batch.
pub async fn get_batch(
    State(roster_api): State<RosterApiType>,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<Vec<RosterRecord>>> {
    let records = roster_api.fetch_roster_batch(BatchId(batch_id)).await?;
    Ok(Json(records))
}
