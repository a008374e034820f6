//! In-process stand-in for the EmailService used by the integration tests.
#![allow(dead_code)] // Not every test binary uses every knob.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mailprobe_domain::{HEALTH_PATH, HEALTHY, LOGIN_PATH, LoginRequest, LoginResponse};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the mock service behaves.
#[derive(Debug, Clone, Copy)]
pub struct MockBehavior {
    /// Key used for the health status field.
    pub status_key: &'static str,
    /// Value reported in the health status field.
    pub health_status: &'static str,
    /// Delay before answering the health endpoint.
    pub health_delay: Duration,
    /// When true, every login succeeds regardless of the address.
    pub accept_any_email: bool,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            status_key: "status",
            health_status: HEALTHY,
            health_delay: Duration::ZERO,
            accept_any_email: false,
        }
    }
}

/// A running mock service; aborted when dropped.
pub struct MockEmailService {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl MockEmailService {
    /// Starts the service on an ephemeral local port.
    pub async fn start(behavior: MockBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("mock service address");

        let router = Router::new()
            .route(HEALTH_PATH, get(health_handler))
            .route(LOGIN_PATH, post(login_handler))
            .with_state(behavior);

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, task }
    }

    /// Base URL of the running service.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockEmailService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Returns a base URL on which nothing is listening.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind a free port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}

async fn health_handler(State(behavior): State<MockBehavior>) -> Response {
    if !behavior.health_delay.is_zero() {
        tokio::time::sleep(behavior.health_delay).await;
    }
    let mut body = serde_json::Map::new();
    body.insert(behavior.status_key.to_string(), serde_json::json!(behavior.health_status));
    (StatusCode::OK, Json(serde_json::Value::Object(body))).into_response()
}

async fn login_handler(
    State(behavior): State<MockBehavior>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if behavior.accept_any_email || looks_like_email(&request.email) {
        let body = LoginResponse {
            success: true,
            message: Some(format!("welcome {}", request.email)),
        };
        (StatusCode::OK, Json(body)).into_response()
    } else {
        let body = LoginResponse {
            success: false,
            message: Some("invalid email".to_string()),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
