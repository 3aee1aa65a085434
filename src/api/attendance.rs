use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::AppServices;
use crate::error::AppError;
use crate::model::attendance::{AttendanceFilter, MarkAttendance};
use crate::utils::validation::parse_date;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Filter by employee ID
    #[schema(example = "EMP001")]
    pub employee_id: Option<String>,
    /// Filter by calendar day (YYYY-MM-DD)
    #[schema(example = "2024-01-15")]
    pub date_filter: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<&AttendanceQuery> for AttendanceFilter {
    type Error = AppError;

    fn try_from(query: &AttendanceQuery) -> Result<Self, Self::Error> {
        let date = non_blank(query.date_filter.as_deref())
            .map(|d| parse_date("date_filter", d))
            .transpose()
            .map_err(|e| AppError::Validation(vec![e]))?;

        Ok(AttendanceFilter {
            employee_id: non_blank(query.employee_id.as_deref()).map(str::to_string),
            date,
        })
    }
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID EMP999 not found"
        })),
        (status = 409, description = "Already marked for that day", body = Object, example = json!({
            "detail": "Attendance already marked for employee EMP001 on 2024-01-15"
        })),
        (status = 422, description = "Malformed date or unknown status"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    svc: web::Data<AppServices>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, AppError> {
    let record = svc.attendance.mark_attendance(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching attendance records in insertion order", body = [AttendanceRecord]),
        (status = 422, description = "Malformed date_filter")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    svc: web::Data<AppServices>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = AttendanceFilter::try_from(&*query)?;
    let records = svc.attendance.list_attendance(&filter).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance of one employee", body = [AttendanceRecord]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    svc: web::Data<AppServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let records = svc
        .attendance
        .employee_attendance(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/stats/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Present/absent totals", body = EmployeeAttendanceStats),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_stats(
    svc: web::Data<AppServices>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let stats = svc.attendance.employee_stats(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
