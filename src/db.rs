use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

use staffdir_core::{Department, Employee, EmployeePatch, NewEmployee};

use crate::error::StoreError;

const SELECT_COLUMNS: &str = "SELECT id, name, email, phone, department, position, \
     joining_date_ms, created_at_ms, updated_at_ms FROM employees";

/// Get current time as milliseconds since Unix epoch.
pub fn current_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Initialize database connection pool with recommended pragmas.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let script = include_str!("../migrations/001_create_employees.sql");
    for statement in script.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    department: String,
    position: String,
    joining_date_ms: i64,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| StoreError::Corrupt(row.id.clone(), what.to_string());

        let department =
            Department::from_str(&row.department).map_err(|_| corrupt("unknown department"))?;
        let joining_date =
            from_epoch_ms(row.joining_date_ms).ok_or_else(|| corrupt("joining date"))?;
        let created_at = from_epoch_ms(row.created_at_ms).ok_or_else(|| corrupt("created_at"))?;
        let updated_at = from_epoch_ms(row.updated_at_ms).ok_or_else(|| corrupt("updated_at"))?;

        Ok(Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            department,
            position: row.position,
            joining_date,
            created_at,
            updated_at,
        })
    }
}

fn from_epoch_ms(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// A unique violation on insert/update can only come from the email column.
fn map_write_error(e: sqlx::Error) -> StoreError {
    if e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::DuplicateEmail
    } else {
        StoreError::Database(e)
    }
}

/// All employees, newest first.
pub async fn list_employees(pool: &SqlitePool) -> Result<Vec<Employee>, StoreError> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "{} ORDER BY created_at_ms DESC, rowid DESC",
        SELECT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Employee::try_from).collect()
}

/// Get an employee by id.
pub async fn get_employee(pool: &SqlitePool, id: &str) -> Result<Employee, StoreError> {
    sqlx::query_as::<_, EmployeeRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound)
        .and_then(Employee::try_from)
}

/// Check if an employee exists.
pub async fn employee_exists(pool: &SqlitePool, id: &str) -> Result<bool, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Find the employee holding `email`, compared case-insensitively.
pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Employee>, StoreError> {
    sqlx::query_as::<_, EmployeeRow>(&format!("{} WHERE email = ?", SELECT_COLUMNS))
        .bind(email)
        .fetch_optional(pool)
        .await?
        .map(Employee::try_from)
        .transpose()
}

/// Insert a new employee, assigning id and timestamps.
///
/// The email pre-check gives an early answer; the UNIQUE column is what
/// actually guards against two concurrent inserts with the same email.
pub async fn insert_employee(
    pool: &SqlitePool,
    new: &NewEmployee,
) -> Result<Employee, StoreError> {
    if find_by_email(pool, &new.email).await?.is_some() {
        return Err(StoreError::DuplicateEmail);
    }

    let id = Uuid::new_v4().to_string();
    let now_ms = current_epoch_ms();
    let joining_date_ms = new
        .joining_date
        .map(|d| d.timestamp_millis())
        .unwrap_or(now_ms);

    sqlx::query(
        r#"
        INSERT INTO employees
            (id, name, email, phone, department, position, joining_date_ms, created_at_ms, updated_at_ms)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(new.department.as_str())
    .bind(&new.position)
    .bind(joining_date_ms)
    .bind(now_ms)
    .bind(now_ms)
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    get_employee(pool, &id).await
}

/// Apply a validated patch. Returns the record as stored afterwards.
/// An empty patch writes nothing and leaves `updated_at` alone.
pub async fn update_employee(
    pool: &SqlitePool,
    id: &str,
    patch: &EmployeePatch,
) -> Result<Employee, StoreError> {
    let mut employee = get_employee(pool, id).await?;
    if patch.is_empty() {
        return Ok(employee);
    }

    if let Some(email) = &patch.email {
        if !email.eq_ignore_ascii_case(&employee.email) {
            if let Some(other) = find_by_email(pool, email).await? {
                if other.id != employee.id {
                    return Err(StoreError::DuplicateEmail);
                }
            }
        }
    }

    patch.apply(&mut employee);

    let result = sqlx::query(
        r#"
        UPDATE employees
        SET name = ?, email = ?, phone = ?, department = ?, position = ?,
            joining_date_ms = ?, updated_at_ms = ?
        WHERE id = ?
        "#,
    )
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(&employee.phone)
    .bind(employee.department.as_str())
    .bind(&employee.position)
    .bind(employee.joining_date.timestamp_millis())
    .bind(current_epoch_ms())
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }

    get_employee(pool, id).await
}

/// Permanently remove an employee.
pub async fn delete_employee(pool: &SqlitePool, id: &str) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
