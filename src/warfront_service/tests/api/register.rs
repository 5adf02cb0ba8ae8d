use jsonwebtoken::{DecodingKey, Validation, decode};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use warfront_adapters::config::test;

use crate::helpers::{TestApp, registration_body};

#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
    exp: i64,
}

#[tokio::test]
async fn register_returns_201_with_player_and_token() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&registration_body("commander_1", "commander1@example.com"))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let player = &body["player"];
    assert_eq!(player["username"], "commander_1");
    assert_eq!(player["email"], "commander1@example.com");
    assert_eq!(player["faction"], "USA");
    assert_eq!(player["starting_resources"], json!({ "money": 1000, "troops": 100 }));
    assert!(player["created_at"].is_string());
    assert!(player.get("password").is_none());
    assert!(player.get("credential_hash").is_none());
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(test::JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap()
    .claims;
    assert_eq!(claims.sub, player["id"].as_str().unwrap());
    assert!(claims.exp > 0);
}

#[tokio::test]
async fn register_accepts_country_and_initial_resources() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "username": "general_petrov",
            "email": "petrov@example.com",
            "password": "password123",
            "country": "RUSSIA",
            "initial_resources": { "oil": 500 }
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["player"]["faction"], "RUSSIA");
    assert_eq!(body["player"]["starting_resources"], json!({ "oil": 500 }));
}

#[tokio::test]
async fn register_defaults_to_empty_starting_resources() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "username": "admiral_li",
            "email": "li@example.com",
            "password": "password123",
            "faction": "CHINA"
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["player"]["starting_resources"], json!({}));
}

#[tokio::test]
async fn register_rejects_duplicate_username_with_409() {
    let app = TestApp::new().await;

    let first = app
        .post_register(&registration_body("commander_1", "first@example.com"))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .post_register(&registration_body("commander_1", "second@example.com"))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn register_rejects_duplicate_email_with_409() {
    let app = TestApp::new().await;

    let first = app
        .post_register(&registration_body("commander_1", "shared@example.com"))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .post_register(&registration_body("commander_2", "shared@example.com"))
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn register_rejects_invalid_input_with_422() {
    let app = TestApp::new().await;

    let test_cases = [
        registration_body("ab", "player@example.com"),
        registration_body("bad name!", "player@example.com"),
        registration_body("valid_name", "not-an-email"),
        json!({
            "username": "valid_name",
            "email": "player@example.com",
            "password": "short",
            "faction": "USA"
        }),
        json!({
            "username": "valid_name",
            "email": "player@example.com",
            "password": "password123",
            "faction": "ATLANTIS"
        }),
        json!({
            "username": "valid_name",
            "password": "password123",
            "faction": "USA"
        }),
        json!({
            "username": "valid_name",
            "email": "player@example.com",
            "password": "password123",
            "faction": "USA",
            "role": "admin"
        }),
    ];

    for body in test_cases {
        let response = app.post_register(&body).await;
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Failed for input: {body}"
        );
    }
}

#[tokio::test]
async fn register_reports_validation_message() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&registration_body("ab", "player@example.com"))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Username must be between 3 and 30 characters");
}

#[tokio::test]
async fn register_accepts_password_longer_than_bcrypt_limit() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({
            "username": "long_password",
            "email": "long@example.com",
            "password": "p".repeat(100),
            "faction": "EUROPE"
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn register_rejects_overlong_email_with_422() {
    let app = TestApp::new().await;

    let email = format!("{}@example.com", "a".repeat(300));
    let response = app
        .post_register(&registration_body("long_email", &email))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email must be at most 254 characters");
}
