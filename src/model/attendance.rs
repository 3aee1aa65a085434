use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::model::employee::id_as_string;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[serde(with = "id_as_string")]
    #[schema(example = "1", value_type = String)]
    pub id: u64,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    /// Joined from the employee registry at read time; null when the employee is gone
    #[schema(example = "John Doe", nullable = true)]
    pub employee_name: Option<String>,
}

/// Raw mark request; `date` and `status` are parsed by the ledger so that
/// malformed values surface as field-level validation errors.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2024-01-15", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    pub fn into_record(self, id: u64, employee_name: Option<String>) -> AttendanceRecord {
        AttendanceRecord {
            id,
            employee_id: self.employee_id,
            date: self.date,
            status: self.status,
            employee_name,
        }
    }
}

/// Recognized filter options for attendance queries. `None` means no filter on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn for_employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: Some(employee_id.into()),
            date: None,
        }
    }

    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            employee_id: None,
            date: Some(date),
        }
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| id == record.employee_id)
            && self.date.is_none_or(|date| date == record.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "EMP001",
    "employee_name": "John Doe",
    "total_records": 3,
    "present_count": 2,
    "absent_count": 1
}))]
pub struct EmployeeAttendanceStats {
    pub employee_id: String,
    pub employee_name: String,
    pub total_records: usize,
    pub present_count: usize,
    pub absent_count: usize,
}
