//! Shared test data.

use chrono::{DateTime, TimeZone, Utc};

use crate::department::Department;
use crate::employee::Employee;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A stored employee with fixed timestamps.
pub fn employee(id: &str, name: &str, email: &str, department: Department) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        department,
        position: "Engineer".to_string(),
        joining_date: fixed_time(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}
