//! Attendance ledger.
//!
//! A second mark for the same employee and day is rejected with a conflict;
//! the first record always stands.

use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, FieldError};
use crate::model::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceStatus, EmployeeAttendanceStats, MarkAttendance,
    NewAttendance,
};
use crate::store::RecordStore;
use crate::utils::validation::{parse_date, require};

#[derive(Clone)]
pub struct AttendanceLedger<S> {
    store: S,
}

pub fn validate_attendance(input: &MarkAttendance) -> AppResult<NewAttendance> {
    let mut errors = Vec::new();

    let employee_id = require("employee_id", &input.employee_id, &mut errors);
    let date = parse_date("date", &input.date)
        .map_err(|e| errors.push(e))
        .ok();
    let status = AttendanceStatus::from_str(input.status.trim())
        .map_err(|_| {
            errors.push(FieldError::new(
                "status",
                "status must be one of: Present, Absent",
            ))
        })
        .ok();

    match (date, status) {
        (Some(date), Some(status)) if errors.is_empty() => Ok(NewAttendance {
            employee_id,
            date,
            status,
        }),
        _ => Err(AppError::Validation(errors)),
    }
}

impl<S: RecordStore> AttendanceLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn mark_attendance(&self, input: MarkAttendance) -> AppResult<AttendanceRecord> {
        let attendance = validate_attendance(&input).inspect_err(|e| {
            warn!(employee_id = %input.employee_id, error = %e, "Rejected attendance input");
        })?;

        let record = self.store.insert_attendance(attendance).await?;
        info!(
            employee_id = %record.employee_id,
            date = %record.date,
            status = %record.status,
            "Attendance marked"
        );
        Ok(record)
    }

    pub async fn list_attendance(&self, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceRecord>> {
        let records = self.store.list_attendance(filter).await?;
        debug!(?filter, count = records.len(), "Listed attendance");
        Ok(records)
    }

    /// All records of one employee, `NotFound` when the employee does not exist.
    pub async fn employee_attendance(&self, employee_id: &str) -> AppResult<Vec<AttendanceRecord>> {
        if self.store.find_employee(employee_id).await?.is_none() {
            return Err(AppError::employee_not_found(employee_id));
        }
        self.list_attendance(&AttendanceFilter::for_employee(employee_id))
            .await
    }

    /// Present/absent totals across every recorded day.
    pub async fn employee_stats(&self, employee_id: &str) -> AppResult<EmployeeAttendanceStats> {
        let employee = self
            .store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(employee_id))?;

        let records = self
            .store
            .list_attendance(&AttendanceFilter::for_employee(employee_id))
            .await?;

        let present_count = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();

        Ok(EmployeeAttendanceStats {
            employee_id: employee.employee_id,
            employee_name: employee.full_name,
            total_records: records.len(),
            present_count,
            absent_count: records.len() - present_count,
        })
    }
}
