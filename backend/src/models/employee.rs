use serde::{Deserialize, Serialize};
use validator::Validate;

/// Directory entry for an employee within a resolved scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "crate::models::id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// The operator's employee multi-select, in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeSelection {
    ids: Vec<String>,
}

impl EmployeeSelection {
    /// Duplicate ids collapse to their first occurrence.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self { ids: out }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SelectEmployeesRequest {
    #[validate(
        length(max = 2000, message = "at most 2000 employees per selection"),
        custom(function = "no_blank_ids")
    )]
    pub employee_ids: Vec<String>,
}

fn no_blank_ids(ids: &[String]) -> Result<(), validator::ValidationError> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        let mut err = validator::ValidationError::new("blank_id");
        err.message = Some("employee ids must not be blank".into());
        return Err(err);
    }
    Ok(())
}
