pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;

use std::{collections::HashMap, sync::Arc};

use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{client::RosterApi, roster::RosterSession};

pub type SessionStore = Arc<RwLock<HashMap<Uuid, RosterSession>>>;
pub type RosterApiType = Arc<dyn RosterApi>;

/// How long a roster session lives, counted from its creation.
#[derive(Clone, Copy, Debug)]
pub struct SessionTtl(pub Duration);

/// Shared application state available to all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub roster_api: RosterApiType,
    pub session_ttl: SessionTtl,
}

impl AppState {
    pub fn new(roster_api: RosterApiType, session_ttl: std::time::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            roster_api,
            session_ttl: SessionTtl(
                Duration::try_from(session_ttl).unwrap_or(Duration::MAX),
            ),
        }
    }
}

/// Drop every session older than `ttl`. Returns how many were removed.
pub fn evict_expired(
    sessions: &mut HashMap<Uuid, RosterSession>,
    now: OffsetDateTime,
    ttl: Duration,
) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired(now, ttl));
    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!(evicted, remaining = sessions.len(), "Expired roster sessions evicted");
    }
    evicted
}

impl axum::extract::FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl axum::extract::FromRef<AppState> for RosterApiType {
    fn from_ref(state: &AppState) -> Self {
        state.roster_api.clone()
    }
}

impl axum::extract::FromRef<AppState> for SessionTtl {
    fn from_ref(state: &AppState) -> Self {
        state.session_ttl
    }
}
