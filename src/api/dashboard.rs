use actix_web::{HttpResponse, web};

use crate::AppServices;
use crate::error::AppError;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Headcount, today's attendance and department breakdown", body = DashboardStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(svc: web::Data<AppServices>) -> Result<HttpResponse, AppError> {
    let stats = svc.stats.compute_dashboard_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
