use std::sync::LazyLock;

use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::Secret;
use serde_json::Value;
use tokio::net::TcpListener;
use warfront_adapters::{
    BcryptCredentialHasher, HashMapAccountStore, JwtTokenService,
    config::{JwtSettings, test},
};
use warfront_service::{RegistrationService, install_prometheus_recorder};

pub const API_PREFIX: &str = "/api/v1";

// The recorder is process-wide, so every TestApp shares one.
static METRICS: LazyLock<PrometheusHandle> =
    LazyLock::new(|| install_prometheus_recorder().expect("Failed to install metrics recorder"));

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        let token_service = JwtTokenService::new(&jwt_settings()).expect("valid jwt settings");
        let hasher = BcryptCredentialHasher::new(test::BCRYPT_COST).expect("valid bcrypt cost");

        let service = RegistrationService::new(
            HashMapAccountStore::new(),
            hasher,
            token_service,
            API_PREFIX,
        )
        .with_metrics(METRICS.clone());

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            service
                .run_standalone(listener, None)
                .await
                .expect("Registration service failed");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}/players/register", self.address, API_PREFIX))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: Some(Secret::new(test::JWT_SECRET.to_string())),
        ..JwtSettings::default()
    }
}

pub fn registration_body(username: &str, email: &str) -> Value {
    serde_json::json!({
        "username": username,
        "email": email,
        "password": "password123",
        "faction": "USA",
        "starting_resources": { "money": 1000, "troops": 100 }
    })
}
