use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::tv_series::{
        CreateEpisodeRequest, CreateSeasonRequest, CreateTvSeriesRequest, EpisodeList, SeasonList,
        TvSeriesList, UpdateTvSeriesRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Episode, Season, TvSeries, TvSeriesDetail},
    response::ApiResponse,
    routes::params::TvSeriesQuery,
    services::tv_series_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_series).post(create_series))
        .route(
            "/{id}",
            get(get_series).put(update_series).delete(delete_series),
        )
        .route("/{id}/seasons", get(list_seasons).post(create_season))
        .route(
            "/{id}/seasons/{season_id}/episodes",
            get(list_episodes).post(create_episode),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/tv-series",
    params(TvSeriesQuery),
    responses(
        (status = 200, description = "Paginated TV series", body = ApiResponse<TvSeriesList>),
    ),
    tag = "TV Series"
)]
pub async fn list_series(
    State(state): State<AppState>,
    Query(query): Query<TvSeriesQuery>,
) -> AppResult<Json<ApiResponse<TvSeriesList>>> {
    let resp = tv_series_service::list_series(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/tv-series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    responses(
        (status = 200, description = "Series with its seasons", body = ApiResponse<TvSeriesDetail>),
        (status = 404, description = "Series not found"),
    ),
    tag = "TV Series"
)]
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TvSeriesDetail>>> {
    let resp = tv_series_service::get_series(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/tv-series",
    request_body = CreateTvSeriesRequest,
    responses(
        (status = 201, description = "Series created", body = ApiResponse<TvSeries>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "TV Series"
)]
pub async fn create_series(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTvSeriesRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TvSeries>>)> {
    let resp = tv_series_service::create_series(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/tv-series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    request_body = UpdateTvSeriesRequest,
    responses(
        (status = 200, description = "Series updated", body = ApiResponse<TvSeries>),
        (status = 404, description = "Series not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "TV Series"
)]
pub async fn update_series(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTvSeriesRequest>,
) -> AppResult<Json<ApiResponse<TvSeries>>> {
    let resp = tv_series_service::update_series(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tv-series/{id}",
    params(("id" = Uuid, Path, description = "Series id")),
    responses(
        (status = 200, description = "Series deleted"),
        (status = 404, description = "Series not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "TV Series"
)]
pub async fn delete_series(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = tv_series_service::delete_series(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/tv-series/{id}/seasons",
    params(("id" = Uuid, Path, description = "Series id")),
    responses(
        (status = 200, description = "Seasons ordered by number", body = ApiResponse<SeasonList>),
        (status = 404, description = "Series not found"),
    ),
    tag = "TV Series"
)]
pub async fn list_seasons(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SeasonList>>> {
    let resp = tv_series_service::list_seasons(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/tv-series/{id}/seasons",
    params(("id" = Uuid, Path, description = "Series id")),
    request_body = CreateSeasonRequest,
    responses(
        (status = 201, description = "Season created", body = ApiResponse<Season>),
        (status = 404, description = "Series not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "TV Series"
)]
pub async fn create_season(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateSeasonRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Season>>)> {
    let resp = tv_series_service::create_season(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tv-series/{id}/seasons/{season_id}/episodes",
    params(
        ("id" = Uuid, Path, description = "Series id"),
        ("season_id" = Uuid, Path, description = "Season id"),
    ),
    responses(
        (status = 200, description = "Episodes ordered by number", body = ApiResponse<EpisodeList>),
        (status = 404, description = "Season not found in this series"),
    ),
    tag = "TV Series"
)]
pub async fn list_episodes(
    State(state): State<AppState>,
    Path((id, season_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<EpisodeList>>> {
    let resp = tv_series_service::list_episodes(&state, id, season_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/tv-series/{id}/seasons/{season_id}/episodes",
    params(
        ("id" = Uuid, Path, description = "Series id"),
        ("season_id" = Uuid, Path, description = "Season id"),
    ),
    request_body = CreateEpisodeRequest,
    responses(
        (status = 201, description = "Episode created", body = ApiResponse<Episode>),
        (status = 404, description = "Season not found in this series"),
    ),
    security(("bearer_auth" = [])),
    tag = "TV Series"
)]
pub async fn create_episode(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, season_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateEpisodeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Episode>>)> {
    let resp = tv_series_service::create_episode(&state, &user, id, season_id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
