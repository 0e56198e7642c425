use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::config::AppConfig;

/// Path prefixes exempt from the perimeter gate: login must stay
/// reachable, as must the health probe, stored uploads and API docs.
pub const PUBLIC_PREFIXES: [&str; 4] = ["/api/v1/auth", "/health", "/uploads", "/docs"];

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl From<&AppConfig> for GateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user: config.gate_user.clone(),
            pass: config.gate_pass.clone(),
        }
    }
}

/// Site-wide Basic auth in front of everything non-public. A single
/// shared credential pair, independent of the per-route bearer tokens.
pub async fn perimeter_gate(
    State(gate): State<GateConfig>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    // Missing configuration fails closed, not open.
    let (Some(expected_user), Some(expected_pass)) = (&gate.user, &gate.pass) else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "Site temporarily unavailable (auth not configured).",
        )
            .into_response();
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(encoded) = header_value.and_then(|v| v.strip_prefix("Basic ")) else {
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"Private Site\"")],
            "Authentication required",
        )
            .into_response();
    };

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default();
    let (user, pass) = decoded.split_once(':').unwrap_or((decoded.as_str(), ""));

    if user == expected_user && pass == expected_pass {
        next.run(request).await
    } else {
        (StatusCode::FORBIDDEN, "Forbidden").into_response()
    }
}
