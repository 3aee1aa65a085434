//! Employee registry: create, look up, list and delete employees.
//!
//! Deleting an employee always removes its attendance rows in the same
//! store transaction.

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, FieldError};
use crate::model::employee::{CreateEmployee, Employee, NewEmployee};
use crate::store::RecordStore;
use crate::utils::validation::{
    DEPARTMENT_MAX_LEN, EMAIL_MAX_LEN, EMPLOYEE_ID_MAX_LEN, FULL_NAME_MAX_LEN, check_max_len,
    is_valid_email, normalize_email, require,
};

#[derive(Clone)]
pub struct EmployeeRegistry<S> {
    store: S,
}

/// Checks every field and reports all failures at once.
pub fn validate_employee(input: &CreateEmployee) -> AppResult<NewEmployee> {
    let mut errors = Vec::new();

    let employee_id = require("employee_id", &input.employee_id, &mut errors);
    check_max_len("employee_id", &employee_id, EMPLOYEE_ID_MAX_LEN, &mut errors);
    let full_name = require("full_name", &input.full_name, &mut errors);
    check_max_len("full_name", &full_name, FULL_NAME_MAX_LEN, &mut errors);
    let department = require("department", &input.department, &mut errors);
    check_max_len("department", &department, DEPARTMENT_MAX_LEN, &mut errors);

    let email = require("email", &input.email, &mut errors);
    if !email.is_empty() && !is_valid_email(&email) {
        errors.push(FieldError::new(
            "email",
            "email must look like local@domain.tld",
        ));
    }
    check_max_len("email", &email, EMAIL_MAX_LEN, &mut errors);

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(NewEmployee {
        employee_id,
        full_name,
        email: normalize_email(&email),
        department,
    })
}

impl<S: RecordStore> EmployeeRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Employees in insertion order.
    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let employees = self.store.list_employees().await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn get_employee(&self, employee_id: &str) -> AppResult<Employee> {
        self.store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(employee_id))
    }

    pub async fn create_employee(&self, input: CreateEmployee) -> AppResult<Employee> {
        let new_employee = validate_employee(&input).inspect_err(|e| {
            warn!(employee_id = %input.employee_id, error = %e, "Rejected employee input");
        })?;

        let employee = self.store.insert_employee(new_employee).await?;
        info!(employee_id = %employee.employee_id, department = %employee.department, "Employee created");
        Ok(employee)
    }

    pub async fn delete_employee(&self, employee_id: &str) -> AppResult<()> {
        let removed = self.store.delete_employee_cascade(employee_id).await?;
        info!(employee_id, attendance_removed = removed, "Employee deleted");
        Ok(())
    }
}
