//! Staffdir Core - Employee model, wire envelope and validation.
//!
//! Shared by the API server and the client library. It has no
//! dependencies on other staffdir crates.

pub mod department;
pub mod employee;
pub mod envelope;
pub mod error;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

// Re-exports for convenience
pub use department::Department;
pub use employee::{Employee, EmployeeInput, EmployeePatch, NewEmployee};
pub use envelope::Envelope;
pub use error::{ValidationError, ValidationErrors};
pub use validation::Validator;
