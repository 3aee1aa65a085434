use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "total_employees": 2,
    "total_attendance_records": 5,
    "today_present": 1,
    "today_absent": 1,
    "today_date": "2024-01-15",
    "departments": { "Engineering": 2 }
}))]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_attendance_records: usize,
    pub today_present: usize,
    pub today_absent: usize,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub today_date: NaiveDate,
    /// Only departments with at least one employee appear
    pub departments: BTreeMap<String, usize>,
}
