use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::movies::{CreateMovieRequest, MovieList, UpdateMovieRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Movie,
    response::ApiResponse,
    routes::params::MovieQuery,
    services::movie_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route(
            "/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(MovieQuery),
    responses(
        (status = 200, description = "Paginated movies", body = ApiResponse<MovieList>),
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Json<ApiResponse<MovieList>>> {
    let resp = movie_service::list_movies(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie by id", body = ApiResponse<Movie>),
        (status = 404, description = "Movie not found"),
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let resp = movie_service::get_movie(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<Movie>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Editor role required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Movie>>)> {
    let resp = movie_service::create_movie(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<Movie>),
        (status = 404, description = "Movie not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMovieRequest>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let resp = movie_service::update_movie(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 404, description = "Movie not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = movie_service::delete_movie(&state, &user, id).await?;
    Ok(Json(resp))
}
