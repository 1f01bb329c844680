pub mod batches;
pub mod employees;
pub mod sessions;
pub mod shifts;
pub mod staging;

use axum::{
    extract::FromRequest,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::{error::AppError, AppState};

/// `Json` whose extraction failures come back as JSON error bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // Sessions
        .route("/api/roster/sessions", post(sessions::create))
        .route("/api/roster/sessions/:id", get(sessions::get_one).delete(sessions::discard))
        // Shift selection
        .route("/api/roster/sessions/:id/shifts/:shift_id/toggle", post(shifts::toggle))
        // Employees
        .route("/api/roster/directory", get(employees::directory))
        .route("/api/roster/sessions/:id/employees", put(employees::select))
        // Staged assignments
        .route(
            "/api/roster/sessions/:id/staged",
            get(staging::list).post(staging::stage).delete(staging::clear),
        )
        .route("/api/roster/sessions/:id/staged/:index", delete(staging::unstage))
        .route("/api/roster/sessions/:id/preview", post(staging::preview))
        .route("/api/roster/sessions/:id/submit", post(staging::submit))
        // Submitted batches
        .route("/api/roster/batches/:batch_id", get(batches::get_batch))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
