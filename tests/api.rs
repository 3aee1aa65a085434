use actix_web::http::{Method, StatusCode, header, header::ContentType};
use actix_web::{App, test, web::Data};
use chrono::{Local, NaiveDate};
use serde_json::{Value, json};

use hrms_lite::AppServices;
use hrms_lite::config::Config;
use hrms_lite::db::Store;
use hrms_lite::routes;
use hrms_lite::store::MemoryStore;

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        database_url: None,
        api_prefix: "/api".into(),
        rate_api_per_min: 0,
        cors_origins: vec!["*".into()],
        log_dir: "logs".into(),
        log_level: tracing::Level::INFO,
    }
}

macro_rules! test_app {
    () => {
        test_app!(test_config(), Data::new(AppServices::new(Store::Memory(MemoryStore::new()))))
    };
    ($config:expr, $services:expr) => {{
        let config = $config;
        test::init_service(
            App::new()
                .wrap(routes::cors(&config))
                .app_data($services)
                .configure(move |cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

fn employee(id: &str, name: &str, department: &str) -> Value {
    json!({
        "employee_id": id,
        "full_name": name,
        "email": format!("{}@co.com", id.to_lowercase()),
        "department": department,
    })
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {
        test::call_service(
            &$app,
            test::TestRequest::post().uri($uri).set_json($body).to_request(),
        )
        .await
    };
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let resp = test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", $uri);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn created_employee_is_listed() {
    let app = test_app!();

    let resp = post_json!(
        app,
        "/api/employees",
        json!({
            "employee_id": "EMP001",
            "full_name": "John Doe",
            "email": "john@co.com",
            "department": "Engineering"
        })
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let listed = get_json!(app, "/api/employees");
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0]["employee_id"], "EMP001");
    assert_eq!(listed[0]["full_name"], "John Doe");
    assert_eq!(listed[0]["email"], "john@co.com");
    assert_eq!(listed[0]["department"], "Engineering");

    let fetched = get_json!(app, "/api/employees/EMP001");
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn duplicate_employee_id_is_a_conflict() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));

    let resp = post_json!(app, "/api/employees", employee("EMP001", "Jane Roe", "Sales"));
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with ID EMP001 already exists");
}

#[actix_web::test]
async fn invalid_employee_reports_fields() {
    let app = test_app!();
    let resp = post_json!(
        app,
        "/api/employees",
        json!({
            "employee_id": "EMP001",
            "full_name": "  ",
            "email": "john.co.com",
            "department": "Engineering"
        })
    );
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["full_name", "email"]);
    assert!(body["detail"].as_str().unwrap().contains("email"));

    let listed = get_json!(app, "/api/employees");
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn missing_json_field_is_unprocessable() {
    let app = test_app!();
    let resp = post_json!(app, "/api/employees", json!({ "employee_id": "EMP001" }));
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_web::test]
async fn marked_attendance_lists_employee_name() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));

    let resp = post_json!(
        app,
        "/api/attendance",
        json!({ "employee_id": "EMP001", "date": "2024-01-15", "status": "Present" })
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["employee_name"], "John Doe");

    let rows = get_json!(app, "/api/attendance?employee_id=EMP001");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employee_name"], "John Doe");
    assert_eq!(rows[0]["date"], "2024-01-15");
    assert_eq!(rows[0]["status"], "Present");
}

#[actix_web::test]
async fn attendance_for_unknown_employee_is_not_found() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));
    post_json!(
        app,
        "/api/attendance",
        json!({ "employee_id": "EMP001", "date": "2024-01-15", "status": "Present" })
    );
    let before = get_json!(app, "/api/attendance");

    let resp = post_json!(
        app,
        "/api/attendance",
        json!({ "employee_id": "EMP999", "date": "2024-01-15", "status": "Present" })
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with ID EMP999 not found");

    assert_eq!(get_json!(app, "/api/attendance"), before);
}

#[actix_web::test]
async fn second_mark_for_same_day_conflicts() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));
    let first = json!({ "employee_id": "EMP001", "date": "2024-01-15", "status": "Present" });
    let second = json!({ "employee_id": "EMP001", "date": "2024-01-15", "status": "Absent" });

    assert_eq!(post_json!(app, "/api/attendance", first).status(), StatusCode::CREATED);
    let resp = post_json!(app, "/api/attendance", second);
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let rows = get_json!(app, "/api/attendance?employee_id=EMP001&date_filter=2024-01-15");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "Present");
}

#[actix_web::test]
async fn malformed_attendance_input_is_rejected() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));

    let resp = post_json!(
        app,
        "/api/attendance",
        json!({ "employee_id": "EMP001", "date": "15-01-2024", "status": "OnLeave" })
    );
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/attendance?date_filter=not-a-date")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn filters_by_date() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "Ann", "Engineering"));
    post_json!(app, "/api/employees", employee("EMP002", "Bob", "Sales"));
    for (id, date) in [("EMP001", "2024-01-14"), ("EMP002", "2024-01-15"), ("EMP001", "2024-01-15")] {
        post_json!(
            app,
            "/api/attendance",
            json!({ "employee_id": id, "date": date, "status": "Present" })
        );
    }

    let rows = get_json!(app, "/api/attendance?date_filter=2024-01-15");
    let ids: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["employee_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["EMP002", "EMP001"]);

    let all = get_json!(app, "/api/attendance?employee_id=&date_filter=");
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn delete_cascades_attendance() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));
    post_json!(app, "/api/employees", employee("EMP002", "Jane Roe", "Engineering"));
    for date in ["2024-01-13", "2024-01-14", "2024-01-15"] {
        post_json!(
            app,
            "/api/attendance",
            json!({ "employee_id": "EMP001", "date": date, "status": "Present" })
        );
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/employees/EMP001").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let rows = get_json!(app, "/api/attendance?employee_id=EMP001");
    assert!(rows.as_array().unwrap().is_empty());

    let employees = get_json!(app, "/api/employees");
    let ids: Vec<_> = employees
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employee_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["EMP002"]);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/employees/EMP001").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/attendance/EMP001").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn employee_stats_totals() {
    let app = test_app!();
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));
    for (date, status) in [("2024-01-13", "Present"), ("2024-01-14", "Absent"), ("2024-01-15", "Present")] {
        post_json!(
            app,
            "/api/attendance",
            json!({ "employee_id": "EMP001", "date": date, "status": status })
        );
    }

    let stats = get_json!(app, "/api/attendance/stats/EMP001");
    assert_eq!(stats["employee_name"], "John Doe");
    assert_eq!(stats["total_records"], 3);
    assert_eq!(stats["present_count"], 2);
    assert_eq!(stats["absent_count"], 1);

    let rows = get_json!(app, "/api/attendance/EMP001");
    assert_eq!(rows.as_array().unwrap().len(), 3);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/attendance/stats/EMP999").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dashboard_counts_departments_and_today() {
    let services = Data::new(AppServices::new(Store::Memory(MemoryStore::new())));
    let app = test_app!(test_config(), services.clone());
    post_json!(app, "/api/employees", employee("EMP001", "John Doe", "Engineering"));
    post_json!(app, "/api/employees", employee("EMP002", "Jane Roe", "Engineering"));

    let before = Local::now().date_naive();
    let stats = get_json!(app, "/api/dashboard/stats");
    let after = Local::now().date_naive();
    assert_eq!(stats["total_employees"], 2);
    assert_eq!(stats["departments"], json!({ "Engineering": 2 }));
    assert_eq!(stats["today_present"], 0);
    assert_eq!(stats["today_absent"], 0);
    let served_day = stats["today_date"].as_str().unwrap();
    assert!(
        [before, after]
            .iter()
            .any(|d| d.format("%Y-%m-%d").to_string() == served_day),
        "today_date {} is not the local calendar day",
        served_day
    );

    for (id, status) in [("EMP001", "Present"), ("EMP002", "Absent")] {
        let resp = post_json!(
            app,
            "/api/attendance",
            json!({ "employee_id": id, "date": "2024-01-15", "status": status })
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    post_json!(
        app,
        "/api/attendance",
        json!({ "employee_id": "EMP002", "date": "2000-01-01", "status": "Present" })
    );

    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let on_day = services.stats.compute_dashboard_stats_on(day).await.unwrap();
    assert_eq!(on_day.today_present, 1);
    assert_eq!(on_day.today_absent, 1);
    assert_eq!(on_day.total_attendance_records, 3);
    assert_eq!(on_day.today_date, day);

    let stats = get_json!(app, "/api/dashboard/stats");
    assert_eq!(stats["total_attendance_records"], 3);
    let employees = get_json!(app, "/api/employees");
    assert_eq!(
        stats["total_employees"].as_u64().unwrap() as usize,
        employees.as_array().unwrap().len()
    );
    let department_sum: u64 = stats["departments"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(department_sum, stats["total_employees"].as_u64().unwrap());
}

#[actix_web::test]
async fn wrong_content_type_is_unsupported_media() {
    let app = test_app!();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(ContentType::plaintext())
            .set_payload(employee("EMP001", "John Doe", "Engineering").to_string())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_web::test]
async fn oversized_body_is_payload_too_large() {
    let app = test_app!();
    let padding = "x".repeat(3 * 1024 * 1024);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(ContentType::json())
            .set_payload(format!(r#"{{"full_name":"{}"}}"#, padding))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn api_scope_is_rate_limited_per_client() {
    let mut config = test_config();
    config.rate_api_per_min = 2;
    let app = test_app!(config, Data::new(AppServices::new(Store::Memory(MemoryStore::new()))));

    let statuses = {
        let mut statuses = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/api/employees")
                .peer_addr("10.0.0.7:40000".parse().unwrap())
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }
        statuses
    };
    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );

    let health = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/health")
            .peer_addr("10.0.0.7:40000".parse().unwrap())
            .to_request(),
    )
    .await;
    assert_eq!(health.status(), StatusCode::OK);
}

#[actix_web::test]
async fn browser_origins_get_cors_headers() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/employees")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let preflight = test::call_service(
        &app,
        test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/employees")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request(),
    )
    .await;
    assert_eq!(preflight.status(), StatusCode::OK);
    assert!(preflight.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[actix_web::test]
async fn listed_origins_only() {
    let mut config = test_config();
    config.cors_origins = vec!["http://localhost:5173".into()];
    let app = test_app!(config, Data::new(AppServices::new(Store::Memory(MemoryStore::new()))));

    let allowed = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/employees")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request(),
    )
    .await;
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );

    let other = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/employees")
            .insert_header((header::ORIGIN, "http://evil.example.com"))
            .to_request(),
    )
    .await;
    assert!(!other.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_web::test]
async fn health_reports_connected_store() {
    let app = test_app!();
    let body = get_json!(app, "/health");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let banner = get_json!(app, "/");
    assert_eq!(banner["status"], "running");
}
