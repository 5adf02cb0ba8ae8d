use reqwest::StatusCode;

use crate::helpers::{TestApp, registration_body};

#[tokio::test]
async fn metrics_count_registration_outcomes() {
    let app = TestApp::new().await;

    let created = app
        .post_register(&registration_body("metrics_user", "metrics@example.com"))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = app
        .post_register(&registration_body("metrics_user", "other@example.com"))
        .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.unwrap();
    assert!(body.contains(r#"warfront_registrations_total{outcome="created"}"#));
    assert!(body.contains(r#"warfront_registrations_total{outcome="duplicate"}"#));
}
