use axum::{Router, body::Body, http::Request, http::StatusCode, middleware, routing::get};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use tower::ServiceExt;

use keepsake_api::middleware::gate::{GateConfig, perimeter_gate};

fn app(gate: GateConfig) -> Router {
    Router::new()
        .route("/api/v1/movies", get(|| async { "movies" }))
        .route("/api/v1/auth/login", get(|| async { "login" }))
        .route("/health", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(gate, perimeter_gate))
}

fn configured() -> GateConfig {
    GateConfig {
        user: Some("keeper".to_string()),
        pass: Some("letmein".to_string()),
    }
}

fn basic_header(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}

#[tokio::test]
async fn unconfigured_gate_fails_closed() {
    let app = app(GateConfig {
        user: None,
        pass: None,
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/movies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("auth not configured"));
}

#[tokio::test]
async fn missing_credentials_get_challenged() {
    let app = app(configured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/movies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get("www-authenticate")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(challenge.starts_with("Basic"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Authentication required");
}

#[tokio::test]
async fn wrong_credentials_are_forbidden() {
    let app = app(configured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/movies")
                .header("authorization", basic_header("keeper", "wrong"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn correct_credentials_pass_through() {
    let app = app(configured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/movies")
                .header("authorization", basic_header("keeper", "letmein"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_prefixes_bypass_the_gate() {
    for path in ["/api/v1/auth/login", "/health"] {
        let app = app(configured());
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn malformed_base64_is_forbidden() {
    let app = app(configured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/movies")
                .header("authorization", "Basic !!!not-base64!!!")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
