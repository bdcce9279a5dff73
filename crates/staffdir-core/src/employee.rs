use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::department::Department;

/// A stored employee record.
///
/// `id`, `created_at` and `updated_at` are assigned by the server and
/// never change through an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub department: Department,
    pub position: String,
    pub joining_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write payload for create and update.
///
/// Every field is optional on the wire: create requires the mandatory ones,
/// update only touches the fields that are present. `department` and
/// `joining_date` stay raw strings so that bad values become field
/// violations instead of body parse errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
}

impl EmployeeInput {
    /// Input carrying the four fields a new record needs.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: Department,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            department: Some(department.as_str().to_string()),
            position: Some(position.into()),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_joining_date(mut self, joining_date: impl Into<String>) -> Self {
        self.joining_date = Some(joining_date.into());
        self
    }
}

/// Prefill for the edit form. The joining date keeps its full timestamp so
/// that saving an untouched form does not move it.
impl From<&Employee> for EmployeeInput {
    fn from(e: &Employee) -> Self {
        Self {
            name: Some(e.name.clone()),
            email: Some(e.email.clone()),
            phone: Some(e.phone.clone()),
            department: Some(e.department.as_str().to_string()),
            position: Some(e.position.clone()),
            joining_date: Some(e.joining_date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

/// A validated, normalized candidate for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub position: String,
    /// Defaults to the creation time when absent.
    pub joining_date: Option<DateTime<Utc>>,
}

/// A validated subset of fields to change on an existing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub position: Option<String>,
    pub joining_date: Option<DateTime<Utc>>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the supplied fields. Identifier and timestamps are untouched.
    pub fn apply(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            employee.phone = phone.clone();
        }
        if let Some(department) = self.department {
            employee.department = department;
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        if let Some(joining_date) = self.joining_date {
            employee.joining_date = joining_date;
        }
    }
}
