use crate::api::attendance::AttendanceQuery;
use crate::error::FieldError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, EmployeeAttendanceStats, MarkAttendance,
};
use crate::model::dashboard::DashboardStats;
use crate::model::employee::{CreateEmployee, Employee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small **Human Resource Management** service: employee records, daily
attendance and a dashboard of aggregate counts.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view and delete employees (deletion removes their attendance)
- **Attendance Management**
  - One Present/Absent mark per employee and day, filterable by employee and date
- **Dashboard**
  - Headcount, today's present/absent counts and department breakdown

### 📦 Response Format
- JSON responses with snake_case fields
- Errors carry a human-readable `detail`; validation errors add per-field `errors`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::employee_stats,

        crate::api::dashboard::dashboard_stats,
        crate::api::health::health_check
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            AttendanceQuery,
            EmployeeAttendanceStats,
            DashboardStats,
            FieldError
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Aggregate statistics"),
        (name = "Health", description = "Service liveness"),
    )
)]
pub struct ApiDoc;
