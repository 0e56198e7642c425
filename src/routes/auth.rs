use axum::{Json, Router, extract::State, http::StatusCode, routing::get, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginSuccess, RegisterRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::PublicUser,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(profile))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login", body = LoginSuccess),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginSuccess>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<PublicUser>),
        (status = 409, description = "Username or email already exists"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PublicUser>>)> {
    let resp = auth_service::register(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    responses(
        (status = 200, description = "Authenticated user's profile", body = ApiResponse<PublicUser>),
        (status = 401, description = "Missing or invalid token"),
    ),
    tag = "Auth"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let resp = auth_service::profile(&state, &user).await?;
    Ok(Json(resp))
}
