use std::fmt;

use thiserror::Error;

/// A single field violation. The messages are shown to end users verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Name cannot exceed 100 characters")]
    NameTooLong,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please provide a valid email")]
    InvalidEmail,

    #[error("Department is required")]
    DepartmentRequired,

    #[error("{0} is not a valid department")]
    InvalidDepartment(String),

    #[error("Position is required")]
    PositionRequired,

    #[error("Position must be at least 2 characters")]
    PositionTooShort,

    #[error("Invalid joining date: {0}")]
    InvalidJoiningDate(String),
}

/// Every violation found in one candidate record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
