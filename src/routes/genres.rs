use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::genres::{CreateGenreRequest, GenreList, UpdateGenreRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Genre,
    response::ApiResponse,
    routes::params::GenreQuery,
    services::genre_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route(
            "/{id}",
            get(get_genre).put(update_genre).delete(delete_genre),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/genres",
    params(GenreQuery),
    responses(
        (status = 200, description = "Paginated genres", body = ApiResponse<GenreList>),
    ),
    tag = "Genres"
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> AppResult<Json<ApiResponse<GenreList>>> {
    let resp = genre_service::list_genres(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre by id", body = ApiResponse<Genre>),
        (status = 404, description = "Genre not found"),
    ),
    tag = "Genres"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Genre>>> {
    let resp = genre_service::get_genre(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = ApiResponse<Genre>),
        (status = 409, description = "Genre already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGenreRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Genre>>)> {
    let resp = genre_service::create_genre(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/genres/{id}",
    params(("id" = Uuid, Path, description = "Genre id")),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = ApiResponse<Genre>),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre name already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGenreRequest>,
) -> AppResult<Json<ApiResponse<Genre>>> {
    let resp = genre_service::update_genre(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted"),
        (status = 404, description = "Genre not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = genre_service::delete_genre(&state, &user, id).await?;
    Ok(Json(resp))
}
