use std::future::Future;

use staffdir_core::{Employee, EmployeeInput};

use crate::error::ClientResult;

/// The five directory operations as seen from the frontend.
pub trait EmployeeApi: Send + Sync {
    /// All employees, newest first.
    fn list(&self) -> impl Future<Output = ClientResult<Vec<Employee>>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = ClientResult<Employee>> + Send;

    fn create(&self, input: &EmployeeInput) -> impl Future<Output = ClientResult<Employee>> + Send;

    fn update(
        &self,
        id: &str,
        input: &EmployeeInput,
    ) -> impl Future<Output = ClientResult<Employee>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = ClientResult<()>> + Send;
}
