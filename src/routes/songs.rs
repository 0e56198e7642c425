use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::songs::{CreateSongRequest, SongList, UpdateSongRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Song,
    response::ApiResponse,
    routes::params::SongQuery,
    services::song_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/{id}", get(get_song).put(update_song).delete(delete_song))
}

#[utoipa::path(
    get,
    path = "/api/v1/songs",
    params(SongQuery),
    responses(
        (status = 200, description = "Paginated songs", body = ApiResponse<SongList>),
    ),
    tag = "Songs"
)]
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<SongQuery>,
) -> AppResult<Json<ApiResponse<SongList>>> {
    let resp = song_service::list_songs(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/songs/{id}",
    params(("id" = Uuid, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song by id", body = ApiResponse<Song>),
        (status = 404, description = "Song not found"),
    ),
    tag = "Songs"
)]
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Song>>> {
    let resp = song_service::get_song(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/songs",
    request_body = CreateSongRequest,
    responses(
        (status = 201, description = "Song created", body = ApiResponse<Song>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Songs"
)]
pub async fn create_song(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSongRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Song>>)> {
    let resp = song_service::create_song(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/songs/{id}",
    params(("id" = Uuid, Path, description = "Song id")),
    request_body = UpdateSongRequest,
    responses(
        (status = 200, description = "Song updated", body = ApiResponse<Song>),
        (status = 404, description = "Song not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Songs"
)]
pub async fn update_song(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSongRequest>,
) -> AppResult<Json<ApiResponse<Song>>> {
    let resp = song_service::update_song(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/songs/{id}",
    params(("id" = Uuid, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song deleted"),
        (status = 404, description = "Song not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Songs"
)]
pub async fn delete_song(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = song_service::delete_song(&state, &user, id).await?;
    Ok(Json(resp))
}
