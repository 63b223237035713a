//! Fake circulars endpoint shared by the integration tests

#![allow(dead_code)]

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};

pub fn sample_item(serial: u32, subject: &str) -> Value {
    json!({
        "serial_no": serial,
        "date": "2024-05-01",
        "order_no": "45/A",
        "subject": subject,
        "pdf_link": format!("https://dte.example/docs/circular%20{}.pdf", serial),
    })
}

async fn ok() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "circulars": [sample_item(12, "Exam <Schedule>"), sample_item(11, "Holiday list")],
    }))
}

async fn empty() -> impl IntoResponse {
    Json(json!({ "success": true, "circulars": [] }))
}

async fn degraded() -> impl IntoResponse {
    Json(json!({
        "success": false,
        "circulars": [sample_item(5, "Sample circular")],
        "debug_info": { "fallback_data": true },
    }))
}

async fn down() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": "upstream down", "circulars": [] })),
    )
}

async fn silent_failure() -> impl IntoResponse {
    Json(json!({ "success": false, "circulars": [] }))
}

async fn bad_gateway() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>Bad gateway</html>")
}

async fn nulls() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "circulars": [{
            "serial_no": 7,
            "date": "31/12/2023",
            "order_no": null,
            "subject": null,
            "pdf_link": "https://dte.example/docs/7.pdf",
        }],
    }))
}

/// Serve the fake endpoint on an ephemeral port and return its base URL
pub async fn spawn_fake_endpoint() -> String {
    let app = Router::new()
        .route("/ok", get(ok))
        .route("/empty", get(empty))
        .route("/degraded", get(degraded))
        .route("/down", get(down))
        .route("/silent", get(silent_failure))
        .route("/bad-gateway", get(bad_gateway))
        .route("/nulls", get(nulls));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
