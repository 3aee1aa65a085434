use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldError;

// Column widths of the employees table, in characters
pub const EMPLOYEE_ID_MAX_LEN: usize = 64;
pub const FULL_NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;
pub const DEPARTMENT_MAX_LEN: usize = 128;

/// Basic `local@domain.tld` shape, no whitespace and exactly one `@`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*\.[A-Za-z]{2,}$").expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Lower-cases the domain part, the local part is kept as typed.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.trim().to_string(),
    }
}

/// Trims `value`, pushing a field error when nothing is left.
pub fn require(field: &str, value: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", field)));
    }
    trimmed.to_string()
}

/// Pushes a field error when `value` is longer than `max` characters.
pub fn check_max_len(field: &str, value: &str, max: usize, errors: &mut Vec<FieldError>) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        FieldError::new(
            field,
            format!("{} must be a calendar date in YYYY-MM-DD form", field),
        )
    })
}
