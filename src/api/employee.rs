use actix_web::{HttpResponse, web};

use crate::AppServices;
use crate::error::AppError;
use crate::model::employee::CreateEmployee;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 409, description = "Employee ID already exists", body = Object, example = json!({
            "detail": "Employee with ID EMP001 already exists"
        })),
        (status = 422, description = "Invalid employee fields", body = Object, example = json!({
            "detail": "email: email must look like local@domain.tld",
            "errors": [{ "field": "email", "message": "email must look like local@domain.tld" }]
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "detail": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    svc: web::Data<AppServices>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = svc.employees.create_employee(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in insertion order", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(svc: web::Data<AppServices>) -> Result<HttpResponse, AppError> {
    let employees = svc.employees.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by business ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID EMP001 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    svc: web::Data<AppServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = svc.employees.get_employee(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee together with its attendance records
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID EMP001 not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    svc: web::Data<AppServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    svc.employees.delete_employee(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
