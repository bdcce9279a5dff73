use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use staffdir_core::{Employee, EmployeeInput, Envelope, Validator};

use crate::db;
use crate::error::ApiError;
use crate::state::AppState;

const DUPLICATE_ON_UPDATE: &str = "Another employee with this email already exists";

type ApiResult<T> = Result<T, ApiError>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

/// Ids are UUIDs; anything else cannot name an employee.
fn parse_id(raw: &str) -> ApiResult<String> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| ApiError::NotFound)
}

/// GET /api/employees - All employees, newest first.
pub async fn list_employees(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Employee>>>> {
    let employees = db::list_employees(&state.pool).await?;

    let count = employees.len();
    Ok(Json(Envelope::data(employees).with_count(count)))
}

/// GET /api/employees/{id} - A single employee.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Employee>>> {
    let id = parse_id(&id)?;
    let employee = db::get_employee(&state.pool, &id).await?;

    Ok(Json(Envelope::data(employee)))
}

/// POST /api/employees - Create a new employee.
pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Employee>>)> {
    let Json(input) = body?;
    let new = Validator::validate_new(&input)?;

    let employee = db::insert_employee(&state.pool, &new).await?;

    tracing::info!("Created employee {} ({})", employee.id, employee.email);
    let envelope = Envelope::data(employee).with_message("Employee created successfully");
    Ok((StatusCode::CREATED, Json(envelope)))
}

/// PUT /api/employees/{id} - Update the supplied fields of an employee.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<Json<Envelope<Employee>>> {
    let id = parse_id(&id)?;

    // Check if employee exists
    match db::employee_exists(&state.pool, &id).await {
        Ok(false) => return Err(ApiError::NotFound),
        Err(e) => return Err(ApiError::from_store(e, DUPLICATE_ON_UPDATE)),
        Ok(true) => {}
    }

    let Json(input) = body?;
    let patch = Validator::validate_patch(&input)?;

    let employee = db::update_employee(&state.pool, &id, &patch)
        .await
        .map_err(|e| ApiError::from_store(e, DUPLICATE_ON_UPDATE))?;

    tracing::info!("Updated employee {}", employee.id);
    let envelope = Envelope::data(employee).with_message("Employee updated successfully");
    Ok(Json(envelope))
}

/// DELETE /api/employees/{id} - Permanently delete an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Value>>> {
    let id = parse_id(&id)?;

    db::delete_employee(&state.pool, &id).await?;

    tracing::info!("Deleted employee {}", id);
    let envelope = Envelope::data(json!({})).with_message("Employee deleted successfully");
    Ok(Json(envelope))
}
