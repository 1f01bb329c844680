use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::rejection::{OrgLevel, RosterRejection};

/// Organizational scope an assignment was built under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OrgScope {
    CompanyWide {
        company: String,
    },
    Scoped {
        company: String,
        department: String,
        sub_department: String,
    },
}

impl OrgScope {
    pub fn company(&self) -> &str {
        match self {
            OrgScope::CompanyWide { company } | OrgScope::Scoped { company, .. } => company,
        }
    }

    /// `None` for company-wide scopes.
    pub fn department(&self) -> Option<&str> {
        match self {
            OrgScope::CompanyWide { .. } => None,
            OrgScope::Scoped { department, .. } => Some(department),
        }
    }

    /// `None` for company-wide scopes.
    pub fn sub_department(&self) -> Option<&str> {
        match self {
            OrgScope::CompanyWide { .. } => None,
            OrgScope::Scoped { sub_department, .. } => Some(sub_department),
        }
    }

    pub fn is_company_wide(&self) -> bool {
        matches!(self, OrgScope::CompanyWide { .. })
    }
}

impl fmt::Display for OrgScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgScope::CompanyWide { company } => write!(f, "company {company} (all departments)"),
            OrgScope::Scoped {
                company,
                department,
                sub_department,
            } => write!(
                f,
                "company {company} / department {department} / sub-department {sub_department}"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    CompanyWide,
    #[default]
    DepartmentScoped,
}

/// Scope as the operator's selectors hold it. Blank strings count as unset,
/// and department fields are ignored in company-wide mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeSelection {
    pub company: Option<String>,
    #[serde(default)]
    pub mode: ScopeMode,
    pub department: Option<String>,
    pub sub_department: Option<String>,
}

impl ScopeSelection {
    pub fn resolve(&self) -> Result<OrgScope, RosterRejection> {
        let company = non_blank(&self.company).ok_or(RosterRejection::MissingScope)?;

        match self.mode {
            ScopeMode::CompanyWide => Ok(OrgScope::CompanyWide { company }),
            ScopeMode::DepartmentScoped => {
                let department = non_blank(&self.department).ok_or(
                    RosterRejection::MissingOrgDetail {
                        level: OrgLevel::Department,
                    },
                )?;
                let sub_department = non_blank(&self.sub_department).ok_or(
                    RosterRejection::MissingOrgDetail {
                        level: OrgLevel::SubDepartment,
                    },
                )?;
                Ok(OrgScope::Scoped {
                    company,
                    department,
                    sub_department,
                })
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
