use std::fmt;
use std::str::FromStr;

use staffdir_core::{Department, Employee, ValidationError};

/// Sentinel shown in the department selector for "no department filter".
pub const ALL_DEPARTMENTS: &str = "All Departments";

/// Department selector state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(Department),
}

impl DepartmentFilter {
    pub fn admits(&self, department: Department) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Only(d) => *d == department,
        }
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentFilter::All => f.write_str(ALL_DEPARTMENTS),
            DepartmentFilter::Only(d) => d.fmt(f),
        }
    }
}

impl FromStr for DepartmentFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_DEPARTMENTS {
            return Ok(DepartmentFilter::All);
        }
        s.parse().map(DepartmentFilter::Only)
    }
}

/// Whether `employee` belongs in the derived view.
///
/// Name or email must contain `search_term` case-insensitively, and the
/// department must pass `filter`. An empty term matches everyone.
pub fn matches(employee: &Employee, search_term: &str, filter: DepartmentFilter) -> bool {
    let term = search_term.to_lowercase();
    let matches_search = employee.name.to_lowercase().contains(&term)
        || employee.email.to_lowercase().contains(&term);

    matches_search && filter.admits(employee.department)
}
