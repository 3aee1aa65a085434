use crate::{
    api::{attendance, dashboard, employee, health},
    config::Config,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpResponse, ResponseError,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    middleware::Condition,
    web,
};
use serde_json::json;

// Helper to build the API limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("rate limiter period and burst are non-zero");
    Governor::new(&cfg)
}

/// Browser access for the configured origins.
pub fn cors(config: &Config) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if config.cors_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin().send_wildcard();
    }
    config
        .cors_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

fn detail(status: StatusCode, detail: String) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": detail }))
}

// Only a body that fails to deserialize is a validation error
fn json_error(err: JsonPayloadError, _: &actix_web::HttpRequest) -> actix_web::Error {
    let status = match &err {
        JsonPayloadError::Deserialize(_) => StatusCode::UNPROCESSABLE_ENTITY,
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        other => other.status_code(),
    };
    let response = detail(status, err.to_string());
    InternalError::from_response(err, response).into()
}

fn query_error(err: QueryPayloadError, _: &actix_web::HttpRequest) -> actix_web::Error {
    let response = detail(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
    InternalError::from_response(err, response).into()
}

/// Registers every route. `rate_api_per_min == 0` disables rate limiting.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let limiter = build_limiter(config.rate_api_per_min);

    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Condition::new(config.rate_api_per_min > 0, limiter))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::mark_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/stats/{employee_id}
                    .service(
                        web::resource("/stats/{employee_id}")
                            .route(web::get().to(attendance::employee_stats)),
                    )
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("/stats").route(web::get().to(dashboard::dashboard_stats))),
            ),
    );
}
