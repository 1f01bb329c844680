#![allow(dead_code)]
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use time::macros::time;
use uuid::Uuid;

use roster_backend::{
    api,
    client::{ClientError, RosterApi},
    models::{
        employee::Employee,
        roster::{BatchId, RosterBatch, RosterRecord},
        scope::OrgScope,
        shift::Shift,
    },
    AppState,
};

/// In-memory stand-in for the HR backend. Records every submitted batch.
#[derive(Default)]
pub struct FakeRosterApi {
    pub shifts: Vec<Shift>,
    pub employees: Vec<(OrgScope, Vec<Employee>)>,
    pub submitted: Mutex<Vec<RosterBatch>>,
    pub fail_submissions: AtomicBool,
    /// Holds every batch this long before accepting it.
    pub submit_delay: Option<Duration>,
}

impl FakeRosterApi {
    /// Catalog used by most tests: A 08-12, B 12-16, C 11-13.
    pub fn with_standard_shifts() -> Self {
        Self {
            shifts: vec![
                Shift::new("a", "A", "Morning", time!(8:00), time!(12:00)).unwrap(),
                Shift::new("b", "B", "Afternoon", time!(12:00), time!(16:00)).unwrap(),
                Shift::new("c", "C", "Midday", time!(11:00), time!(13:00)).unwrap(),
            ],
            ..Default::default()
        }
    }

    pub fn submitted(&self) -> Vec<RosterBatch> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn fail_next_submissions(&self, fail: bool) {
        self.fail_submissions.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RosterApi for FakeRosterApi {
    async fn list_shifts(&self) -> Result<Vec<Shift>, ClientError> {
        Ok(self.shifts.clone())
    }

    async fn list_employees(&self, scope: &OrgScope) -> Result<Vec<Employee>, ClientError> {
        Ok(self
            .employees
            .iter()
            .find(|(s, _)| s == scope)
            .map(|(_, e)| e.clone())
            .unwrap_or_default())
    }

    async fn create_roster_batch(&self, batch: &RosterBatch) -> Result<(), ClientError> {
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 503,
                body: "maintenance".into(),
            });
        }
        self.submitted.lock().unwrap().push(batch.clone());
        Ok(())
    }

    async fn fetch_roster_batch(
        &self,
        batch_id: BatchId,
    ) -> Result<Vec<RosterRecord>, ClientError> {
        let submitted = self.submitted.lock().unwrap();
        Ok(submitted
            .iter()
            .filter(|b| b.batch_id == batch_id)
            .flat_map(|b| b.rows.iter())
            .map(|r| RosterRecord {
                id: None,
                batch_id: Some(r.batch_id.to_string()),
                shift_id: r.shift_id.clone(),
                shift_code: None,
                shift_name: None,
                company_id: Some(r.company_id.clone()),
                department_id: r.department_id.clone(),
                sub_department_id: r.sub_department_id.clone(),
                employee_id: r.employee_id.clone(),
                from_date: Some(r.from_date),
                to_date: Some(r.to_date),
                note: Some(r.note.clone()),
            })
            .collect())
    }
}

/// Spin up a real Axum server on a random port backed by `fake`.
pub async fn setup_test_app(fake: Arc<FakeRosterApi>) -> SocketAddr {
    setup_test_app_with_ttl(fake, Duration::from_secs(8 * 60 * 60)).await
}

pub async fn setup_test_app_with_ttl(fake: Arc<FakeRosterApi>, session_ttl: Duration) -> SocketAddr {
    let state = AppState::new(fake, session_ttl);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Create a session over HTTP and return its id.
pub async fn create_session(addr: SocketAddr) -> Uuid {
    let resp = http_client()
        .post(format!("http://{}/api/roster/sessions", addr))
        .send()
        .await
        .expect("Create session request failed");
    assert_eq!(resp.status(), 200, "Session creation should return 200");

    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("Response should contain a session id")
}

pub async fn toggle(addr: SocketAddr, session: Uuid, shift_id: &str) -> reqwest::Response {
    http_client()
        .post(format!(
            "http://{}/api/roster/sessions/{}/shifts/{}/toggle",
            addr, session, shift_id
        ))
        .send()
        .await
        .unwrap()
}

pub async fn select_employees(addr: SocketAddr, session: Uuid, ids: &[&str]) -> reqwest::Response {
    http_client()
        .put(format!("http://{}/api/roster/sessions/{}/employees", addr, session))
        .json(&serde_json::json!({ "employee_ids": ids }))
        .send()
        .await
        .unwrap()
}

pub async fn stage(
    addr: SocketAddr,
    session: Uuid,
    body: serde_json::Value,
) -> reqwest::Response {
    http_client()
        .post(format!("http://{}/api/roster/sessions/{}/staged", addr, session))
        .json(&body)
        .send()
        .await
        .unwrap()
}

pub async fn submit(addr: SocketAddr, session: Uuid) -> reqwest::Response {
    http_client()
        .post(format!("http://{}/api/roster/sessions/{}/submit", addr, session))
        .send()
        .await
        .unwrap()
}
