use reqwest::StatusCode;
use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn healthz_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn readyz_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/readyz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/players").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
