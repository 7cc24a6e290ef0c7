//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use spendwise_core::FixedClock;
use tower::ServiceExt;

fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
    ))
}

fn setup_test_app() -> Router {
    let config = ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    };
    create_router_with_clock(InsightConfig::default(), config, fixed_clock())
}

fn setup_auth_app() -> Router {
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        api_keys: vec!["secret-key-123".to_string()],
    };
    create_router_with_clock(InsightConfig::default(), config, fixed_clock())
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_insights_empty() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/insights",
            &serde_json::json!({ "expenses": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "title": "No insights yet",
            "message": "Start adding expenses to get smart insights.",
            "percentage": 0,
            "severity": "info",
            "recommendations": [],
            "popup": null
        })
    );
}

#[tokio::test]
async fn test_insights_report() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "expenses": [
            {"category": "Food", "amount": 1000, "date": "2024-03-17T10:00:00+05:30"},
            {"category": "Food", "amount": 1000, "date": "2024-03-10T10:00:00+05:30"},
            {"category": "Travel", "amount": 500, "date": "2024-03-10T12:00:00Z"}
        ]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["title"], "Food is your top expense");
    assert_eq!(json["percentage"], 80);
    assert_eq!(json["severity"], "danger");
    assert_eq!(json["popup"]["type"], "warning");
    assert_eq!(json["autoBudget"]["suggested"], 1800);
    // this week 1000, last week 1500 (pinned clock)
    assert_eq!(
        json["weeklyTrend"],
        serde_json::json!({"change": 500, "direction": "down"})
    );
    assert!(json.get("anomaly").is_none());
    assert!(json.get("forecast").is_none());
}

#[tokio::test]
async fn test_insights_with_budget() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "expenses": [
            {"category": "Rent", "amount": 500, "date": "2024-03-19T10:00:00Z"},
            {"category": "Food", "amount": 300, "date": "2024-03-19T10:00:00Z"},
            {"category": "Travel", "amount": 400, "date": "2024-03-19T10:00:00Z"}
        ],
        "budgets": {"Rent": 400}
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["budgetUsage"], 125);
    assert_eq!(json["severity"], "danger");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .ends_with("🚨 You have exceeded your Rent budget."));
}

#[tokio::test]
async fn test_insights_rejects_negative_amount() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "expenses": [
            {"category": "Food", "amount": -5, "date": "2024-03-19T10:00:00Z"}
        ]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("expenses[0]"));
}

#[tokio::test]
async fn test_insights_rejects_missing_date() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "expenses": [{"category": "Food", "amount": 5}]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insights_rejects_malformed_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/insights")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_monthly_report() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "month": "2024-02",
        "expenses": [
            {"category": "Food", "amount": 600, "date": "2024-02-03T10:00:00Z"},
            {"category": "Travel", "amount": 400, "date": "2024-02-10T10:00:00Z"},
            {"category": "Food", "amount": 50, "date": "2024-03-01T10:00:00Z"}
        ]
    });

    let response = app
        .oneshot(post_json("/api/reports/monthly", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "2024-02");
    assert_eq!(json["totalSpent"], 1000.0);
    assert_eq!(json["expenseCount"], 2);
    assert_eq!(json["categories"][0]["category"], "Food");
}

#[tokio::test]
async fn test_monthly_report_defaults_to_current_month() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "expenses": [
            {"category": "Food", "amount": 50, "date": "2024-03-01T10:00:00Z"}
        ]
    });

    let response = app
        .oneshot(post_json("/api/reports/monthly", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "2024-03");
    assert_eq!(json["expenseCount"], 1);
}

#[tokio::test]
async fn test_monthly_report_invalid_month() {
    let app = setup_test_app();

    let body = serde_json::json!({ "month": "2024-13", "expenses": [] });

    let response = app
        .oneshot(post_json("/api/reports/monthly", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Health Tests ==========

#[tokio::test]
async fn test_health() {
    let app = setup_auth_app();

    // Health is reachable without credentials
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json.get("version").is_some());
}

// ========== Authentication Tests ==========

#[tokio::test]
async fn test_auth_required() {
    let app = setup_auth_app();

    let response = app
        .oneshot(post_json(
            "/api/insights",
            &serde_json::json!({ "expenses": [] }),
        ))
        .await
        .unwrap();

    // Should get 401 without a bearer token
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_auth_with_api_key() {
    let app = setup_auth_app();

    let mut request = post_json("/api/insights", &serde_json::json!({ "expenses": [] }));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer secret-key-123"),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_wrong_api_key() {
    let app = setup_auth_app();

    let mut request = post_json("/api/insights", &serde_json::json!({ "expenses": [] }));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer secret-key-124"),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["abc".to_string(), "longer-key".to_string()];
    assert!(validate_api_key("abc", &keys));
    assert!(validate_api_key("longer-key", &keys));
    assert!(!validate_api_key("abd", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("abc", &[]));
}

#[test]
fn test_parse_list() {
    assert_eq!(
        parse_list(" a, b ,,c "),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert!(parse_list("").is_empty());
}

// ========== Error Mapping Tests ==========

#[tokio::test]
async fn test_invalid_data_maps_to_bad_request() {
    let err = spendwise_core::Error::InvalidData("expenses[2]: amount must be positive".into());
    let response = AppError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("expenses[2]: amount must be positive"));
}

#[tokio::test]
async fn test_internal_errors_are_hidden() {
    let err = spendwise_core::Error::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "/etc/spendwise/insights.toml",
    ));
    let response = AppError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");

    let response = AppError::from(spendwise_core::Error::Config("bad ratio".into())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ========== Security Header Tests ==========

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
}
