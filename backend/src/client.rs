//! Client for the HR backend that owns shifts, the employee directory and
//! roster persistence. Everything that knows the backend's payload shapes
//! lives here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{
    employee::Employee,
    roster::{BatchId, RosterBatch, RosterRecord, RosterRow},
    scope::OrgScope,
    shift::{Shift, ShiftRecord},
};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Roster API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Roster API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected roster API payload: {0}")]
    Payload(String),
}

#[async_trait]
pub trait RosterApi: Send + Sync {
    /// Shift catalog. Entries the roster model cannot represent are dropped.
    async fn list_shifts(&self) -> Result<Vec<Shift>, ClientError>;

    async fn list_employees(&self, scope: &OrgScope) -> Result<Vec<Employee>, ClientError>;

    /// Persist every row of the batch in one call.
    async fn create_roster_batch(&self, batch: &RosterBatch) -> Result<(), ClientError>;

    async fn fetch_roster_batch(&self, batch_id: BatchId)
        -> Result<Vec<RosterRecord>, ClientError>;
}

pub struct HttpRosterApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRosterApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// The backend sometimes wraps list payloads in `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

#[derive(Serialize)]
struct CreateBatchBody<'a> {
    batch_id: BatchId,
    rosters: &'a [RosterRow],
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RosterApi for HttpRosterApi {
    #[tracing::instrument(name = "Fetch shift catalog", skip_all)]
    async fn list_shifts(&self) -> Result<Vec<Shift>, ClientError> {
        let resp = self.client.get(self.url("/shifts")).send().await?;
        let records: Envelope<Vec<ShiftRecord>> = ensure_success(resp).await?.json().await?;

        let shifts: Vec<Shift> = records
            .into_inner()
            .into_iter()
            .filter_map(ShiftRecord::into_shift)
            .collect();
        tracing::debug!("Loaded {} shifts", shifts.len());
        Ok(shifts)
    }

    #[tracing::instrument(name = "Fetch employees for scope", skip(self))]
    async fn list_employees(&self, scope: &OrgScope) -> Result<Vec<Employee>, ClientError> {
        let mut query = vec![("company_id", scope.company())];
        if let (Some(dept), Some(sub)) = (scope.department(), scope.sub_department()) {
            query.push(("department_id", dept));
            query.push(("sub_department_id", sub));
        }

        let resp = self
            .client
            .get(self.url("/employees"))
            .query(&query)
            .send()
            .await?;
        let employees: Envelope<Vec<Employee>> = ensure_success(resp).await?.json().await?;
        Ok(employees.into_inner())
    }

    #[tracing::instrument(name = "Submit roster batch", skip_all, fields(batch_id = %batch.batch_id, rows = batch.rows.len()))]
    async fn create_roster_batch(&self, batch: &RosterBatch) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(self.url("/rosters/batch"))
            .json(&CreateBatchBody {
                batch_id: batch.batch_id,
                rosters: &batch.rows,
            })
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Fetch roster batch", skip(self))]
    async fn fetch_roster_batch(
        &self,
        batch_id: BatchId,
    ) -> Result<Vec<RosterRecord>, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/rosters/batch/{batch_id}")))
            .send()
            .await?;
        let raw: Envelope<Vec<serde_json::Value>> = ensure_success(resp).await?.json().await?;

        raw.into_inner()
            .into_iter()
            .map(normalize_roster_record)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RosterDetails {
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    shift_id: Option<String>,
    #[serde(default)]
    shift_code: Option<String>,
    #[serde(default)]
    shift_name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    company_id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    department_id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    sub_department_id: Option<String>,
    #[serde(default, alias = "from")]
    from_date: Option<String>,
    #[serde(default, alias = "to")]
    to_date: Option<String>,
    #[serde(default, alias = "remark")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRosterRecord {
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    batch_id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::opt_id_string")]
    employee_id: Option<String>,
    #[serde(default)]
    roster_details: Option<RosterDetails>,
    #[serde(flatten)]
    flat: RosterDetails,
}

/// Translate one roster entry from the backend into a [`RosterRecord`].
///
/// Entries come either flat or with shift/scope fields nested under
/// `roster_details`; nested values win when both are present. Department
/// ids of `"0"` or `""` mean "not applicable" and become `None`.
pub fn normalize_roster_record(raw: serde_json::Value) -> Result<RosterRecord, ClientError> {
    let raw: RawRosterRecord =
        serde_json::from_value(raw).map_err(|e| ClientError::Payload(e.to_string()))?;
    let nested = raw.roster_details.unwrap_or_default();
    let flat = raw.flat;

    let shift_id = nested
        .shift_id
        .or(flat.shift_id)
        .ok_or_else(|| ClientError::Payload("roster record without shift_id".into()))?;
    let employee_id = raw
        .employee_id
        .ok_or_else(|| ClientError::Payload("roster record without employee_id".into()))?;

    Ok(RosterRecord {
        id: raw.id,
        batch_id: raw.batch_id,
        shift_id,
        shift_code: nested.shift_code.or(flat.shift_code),
        shift_name: nested.shift_name.or(flat.shift_name),
        company_id: nested.company_id.or(flat.company_id),
        department_id: org_level(nested.department_id.or(flat.department_id)),
        sub_department_id: org_level(nested.sub_department_id.or(flat.sub_department_id)),
        employee_id,
        from_date: parse_date(nested.from_date.or(flat.from_date))?,
        to_date: parse_date(nested.to_date.or(flat.to_date))?,
        note: nested.note.or(flat.note),
    })
}

fn org_level(id: Option<String>) -> Option<String> {
    id.filter(|s| !s.is_empty() && s != "0")
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: Option<String>) -> Result<Option<Date>, ClientError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let day = value.get(..10).unwrap_or(&value);
    Date::parse(day, time::macros::format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|e| ClientError::Payload(format!("bad date {value:?}: {e}")))
}
