use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The fixed set of departments an employee can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Sales,
    Finance,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Marketing,
        Department::HumanResources,
        Department::Sales,
        Department::Finance,
    ];

    /// Display name, also used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::HumanResources => "Human Resources",
            Department::Sales => "Sales",
            Department::Finance => "Finance",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidDepartment(s.to_string()))
    }
}
