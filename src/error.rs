use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "email must look like local@domain.tld")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum AppError {
    #[display(fmt = "{}", "join_fields(_0)")]
    Validation(Vec<FieldError>),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "Storage failure: {}", _0)]
    Storage(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn employee_not_found(employee_id: &str) -> Self {
        AppError::NotFound(format!("Employee with ID {} not found", employee_id))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmployeeNotFound(id) => AppError::employee_not_found(&id),
            StoreError::DuplicateEmployee(id) => {
                AppError::Conflict(format!("Employee with ID {} already exists", id))
            }
            StoreError::DuplicateAttendance { employee_id, date } => AppError::Conflict(format!(
                "Attendance already marked for employee {} on {}",
                employee_id, date
            )),
            StoreError::Backend(msg) => AppError::Storage(msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "detail": self.to_string(),
                "errors": errors,
            }),
            // storage details stay in the log
            AppError::Storage(msg) => {
                error!(error = %msg, "Request failed on storage");
                json!({ "detail": "Something went wrong, Contact with system admin" })
            }
            _ => json!({ "detail": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
