use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::department::Department;
use crate::employee::{EmployeeInput, EmployeePatch, NewEmployee};
use crate::error::{ValidationError, ValidationErrors};

// Word characters are ASCII only; `jörg@co.com` is not a valid address.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
        .expect("email pattern is valid")
});

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const POSITION_MIN_CHARS: usize = 2;

/// Validator for employee writes.
pub struct Validator;

impl Validator {
    /// Validate and trim a name.
    pub fn validate_name(name: &str) -> Result<String, ValidationError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 {
            return Err(ValidationError::NameRequired);
        }
        if len < NAME_MIN_CHARS {
            return Err(ValidationError::NameTooShort);
        }
        if len > NAME_MAX_CHARS {
            return Err(ValidationError::NameTooLong);
        }
        Ok(name.to_string())
    }

    /// Validate an email. Returns the trimmed, lower-cased address.
    pub fn validate_email(email: &str) -> Result<String, ValidationError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(email)
    }

    pub fn validate_department(department: &str) -> Result<Department, ValidationError> {
        if department.trim().is_empty() {
            return Err(ValidationError::DepartmentRequired);
        }
        department.parse()
    }

    pub fn validate_position(position: &str) -> Result<String, ValidationError> {
        let position = position.trim();
        let len = position.chars().count();
        if len == 0 {
            return Err(ValidationError::PositionRequired);
        }
        if len < POSITION_MIN_CHARS {
            return Err(ValidationError::PositionTooShort);
        }
        Ok(position.to_string())
    }

    /// Parse a joining date.
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
    /// A blank value means "not supplied".
    pub fn validate_joining_date(value: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Ok(Some(ts.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Some(dt.and_utc()))
            .ok_or_else(|| ValidationError::InvalidJoiningDate(value.to_string()))
    }

    /// Validate a full record for creation, collecting every violation.
    pub fn validate_new(input: &EmployeeInput) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = Vec::new();

        let name = collect(
            &mut errors,
            required(&input.name, ValidationError::NameRequired).and_then(Self::validate_name),
        );
        let email = collect(
            &mut errors,
            required(&input.email, ValidationError::EmailRequired).and_then(Self::validate_email),
        );
        let department = collect(
            &mut errors,
            required(&input.department, ValidationError::DepartmentRequired)
                .and_then(Self::validate_department),
        );
        let position = collect(
            &mut errors,
            required(&input.position, ValidationError::PositionRequired)
                .and_then(Self::validate_position),
        );
        let joining_date = collect(
            &mut errors,
            input
                .joining_date
                .as_deref()
                .map_or(Ok(None), Self::validate_joining_date),
        );

        let phone = input.phone.as_deref().unwrap_or_default().trim();
        match (name, email, department, position, joining_date) {
            (Some(name), Some(email), Some(department), Some(position), Some(joining_date))
                if errors.is_empty() =>
            {
                Ok(NewEmployee {
                    name,
                    email,
                    phone: phone.to_string(),
                    department,
                    position,
                    joining_date,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }

    /// Validate only the supplied fields of an update.
    pub fn validate_patch(input: &EmployeeInput) -> Result<EmployeePatch, ValidationErrors> {
        let mut errors = Vec::new();

        let patch = EmployeePatch {
            name: input
                .name
                .as_deref()
                .and_then(|v| collect(&mut errors, Self::validate_name(v))),
            email: input
                .email
                .as_deref()
                .and_then(|v| collect(&mut errors, Self::validate_email(v))),
            phone: input.phone.as_deref().map(|v| v.trim().to_string()),
            department: input
                .department
                .as_deref()
                .and_then(|v| collect(&mut errors, Self::validate_department(v))),
            position: input
                .position
                .as_deref()
                .and_then(|v| collect(&mut errors, Self::validate_position(v))),
            joining_date: input
                .joining_date
                .as_deref()
                .and_then(|v| collect(&mut errors, Self::validate_joining_date(v)))
                .flatten(),
        };

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn required(value: &Option<String>, missing: ValidationError) -> Result<&str, ValidationError> {
    value.as_deref().ok_or(missing)
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> EmployeeInput {
        EmployeeInput::new("Ann Lee", "ann@co.com", Department::Engineering, "Engineer")
    }

    #[test]
    fn test_valid_name() {
        assert_eq!(Validator::validate_name("  Ann Lee ").unwrap(), "Ann Lee");
        assert!(Validator::validate_name("Al").is_ok());
        assert!(Validator::validate_name(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            Validator::validate_name("   "),
            Err(ValidationError::NameRequired)
        );
        assert_eq!(
            Validator::validate_name("A"),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            Validator::validate_name(&"a".repeat(101)),
            Err(ValidationError::NameTooLong)
        );
    }

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(
            Validator::validate_email(" Ann.Lee@Co.COM ").unwrap(),
            "ann.lee@co.com"
        );
        assert!(Validator::validate_email("first-last@mail.co.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            Validator::validate_email(""),
            Err(ValidationError::EmailRequired)
        );
        for email in ["ann", "ann@co", "ann@co.comma", "a b@co.com"] {
            assert_eq!(
                Validator::validate_email(email),
                Err(ValidationError::InvalidEmail)
            );
        }
    }

    #[test]
    fn test_email_word_characters_are_ascii() {
        assert_eq!(
            Validator::validate_email("jörg@co.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            Validator::validate_email("ann@cö.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert!(Validator::validate_email("jorg_1@co.com").is_ok());
    }

    #[test]
    fn test_department() {
        assert_eq!(
            Validator::validate_department("Human Resources").unwrap(),
            Department::HumanResources
        );
        assert_eq!(
            Validator::validate_department(""),
            Err(ValidationError::DepartmentRequired)
        );
        assert_eq!(
            Validator::validate_department("Legal"),
            Err(ValidationError::InvalidDepartment("Legal".to_string()))
        );
        assert_eq!(
            ValidationError::InvalidDepartment("Legal".to_string()).to_string(),
            "Legal is not a valid department"
        );
    }

    #[test]
    fn test_position() {
        assert!(Validator::validate_position("QA").is_ok());
        assert_eq!(
            Validator::validate_position("Q"),
            Err(ValidationError::PositionTooShort)
        );
        assert_eq!(
            Validator::validate_position(""),
            Err(ValidationError::PositionRequired)
        );
    }

    #[test]
    fn test_joining_date_formats() {
        let date = Validator::validate_joining_date("2024-03-01")
            .unwrap()
            .unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let ts = Validator::validate_joining_date("2024-03-01T10:30:00+02:00")
            .unwrap()
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T08:30:00+00:00");

        assert_eq!(Validator::validate_joining_date("  ").unwrap(), None);
        assert!(Validator::validate_joining_date("next monday").is_err());
    }

    #[test]
    fn test_validate_new() {
        let new = Validator::validate_new(&valid_input().with_phone(" 555-0100 ")).unwrap();
        assert_eq!(new.name, "Ann Lee");
        assert_eq!(new.email, "ann@co.com");
        assert_eq!(new.phone, "555-0100");
        assert_eq!(new.department, Department::Engineering);
        assert_eq!(new.joining_date, None);
    }

    #[test]
    fn test_validate_new_collects_all_violations() {
        let input = EmployeeInput {
            name: Some("A".to_string()),
            email: Some("not-an-email".to_string()),
            department: Some("Legal".to_string()),
            ..EmployeeInput::default()
        };

        let errors = Validator::validate_new(&input).unwrap_err();
        assert_eq!(errors.0.len(), 4);
        assert!(errors.0.contains(&ValidationError::NameTooShort));
        assert!(errors.0.contains(&ValidationError::InvalidEmail));
        let legal = ValidationError::InvalidDepartment("Legal".to_string());
        assert!(errors.0.contains(&legal));
        assert!(errors.0.contains(&ValidationError::PositionRequired));
    }

    #[test]
    fn test_validate_patch_only_checks_supplied_fields() {
        let input = EmployeeInput {
            position: Some("Manager".to_string()),
            ..EmployeeInput::default()
        };
        let patch = Validator::validate_patch(&input).unwrap();
        assert_eq!(patch.position.as_deref(), Some("Manager"));
        assert!(patch.name.is_none());

        assert!(Validator::validate_patch(&EmployeeInput::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_validate_patch_rejects_blank_required_field() {
        let input = EmployeeInput {
            name: Some("  ".to_string()),
            ..EmployeeInput::default()
        };
        let errors = Validator::validate_patch(&input).unwrap_err();
        assert_eq!(errors.messages(), vec!["Name is required".to_string()]);
    }
}
