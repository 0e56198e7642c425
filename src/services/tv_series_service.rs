use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db,
    dto::tv_series::{
        CreateEpisodeRequest, CreateSeasonRequest, CreateTvSeriesRequest, EpisodeList, SeasonList,
        TvSeriesList, UpdateTvSeriesRequest,
    },
    dto::validate,
    entity::{
        Episodes, Genres, Seasons, TvSeries as TvSeriesEntity, TvSeriesGenres, episodes, genres,
        seasons,
        tv_series::{ActiveModel, Column, Model as SeriesModel},
        tv_series_genres,
    },
    error::{AppError, AppResult, on_unique},
    middleware::auth::{AuthUser, ensure_editor},
    models::{Episode, Season, TvSeries, TvSeriesDetail},
    response::{ApiResponse, PageMeta},
    routes::params::{SortOrder, TvSeriesQuery, TvSeriesSortBy, paginate},
    state::AppState,
};

pub async fn list_series(
    state: &AppState,
    query: TvSeriesQuery,
) -> AppResult<ApiResponse<TvSeriesList>> {
    let (page, limit, offset) = paginate(query.page, query.limit);

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(status.clone()));
    }
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Title).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    let sort_col = match query.sort_by.unwrap_or(TvSeriesSortBy::CreatedAt) {
        TvSeriesSortBy::CreatedAt => Column::CreatedAt,
        TvSeriesSortBy::Title => Column::Title,
        TvSeriesSortBy::FirstAirDate => Column::FirstAirDate,
        TvSeriesSortBy::Rating => Column::Rating,
    };

    let mut finder = TvSeriesEntity::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let count_fut = finder.clone().count(&state.orm);
    let data_fut = finder.limit(limit as u64).offset(offset as u64).all(&state.orm);
    let (total, rows) = db::with_timeout(async { tokio::try_join!(count_fut, data_fut) }).await?;

    let mut genre_map = genres_for_series(state, rows.iter().map(|s| s.id).collect()).await?;
    let items = rows
        .into_iter()
        .map(|s| {
            let genre_names = genre_map.remove(&s.id).unwrap_or_default();
            series_from_entity(s, genre_names)
        })
        .collect();

    Ok(ApiResponse::paginated(
        TvSeriesList { items },
        PageMeta::new(page, limit, total as i64),
    ))
}

/// Single-series fetch carries its genre names and ordered seasons.
pub async fn get_series(state: &AppState, id: Uuid) -> AppResult<ApiResponse<TvSeriesDetail>> {
    let series = db::with_timeout(TvSeriesEntity::find_by_id(id).one(&state.orm)).await?;
    let series = match series {
        Some(s) => s,
        None => return Err(AppError::NotFound("TV Series")),
    };

    let genres_fut = genres_for_series(state, vec![series.id]);
    let seasons_fut = db::with_timeout(
        Seasons::find()
            .filter(seasons::Column::SeriesId.eq(series.id))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&state.orm),
    );
    let (mut genre_map, season_rows) = tokio::try_join!(genres_fut, seasons_fut)?;

    let genre_names = genre_map.remove(&series.id).unwrap_or_default();
    let seasons = season_rows.into_iter().map(season_from_entity).collect();

    Ok(ApiResponse::success(TvSeriesDetail {
        series: series_from_entity(series, genre_names),
        seasons,
    }))
}

pub async fn create_series(
    state: &AppState,
    user: &AuthUser,
    mut payload: CreateTvSeriesRequest,
) -> AppResult<ApiResponse<TvSeries>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve genre names before touching the tv_series table so a bad
    // name rejects the request without leaving a half-created row.
    let names = payload.genres.take().unwrap_or_default();
    let resolved = resolve_genres(state, &names).await?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        total_seasons: Set(payload.total_seasons.unwrap_or(1)),
        total_episodes: Set(payload.total_episodes.unwrap_or(0)),
        first_air_date: Set(payload.first_air_date),
        last_air_date: Set(payload.last_air_date),
        description: Set(payload.description),
        rating: Set(payload.rating),
        poster_url: Set(payload.poster_url),
        status: Set(payload.status.unwrap_or_else(|| "active".to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let series = db::with_timeout(active.insert(&state.orm)).await?;

    let genre_names = link_genres(state, series.id, resolved).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "tv_series_create",
        Some("tv_series"),
        Some(serde_json::json!({ "series_id": series.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        series_from_entity(series, genre_names),
        "TV Series created successfully",
    ))
}

pub async fn update_series(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    mut payload: UpdateTvSeriesRequest,
) -> AppResult<ApiResponse<TvSeries>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve the replacement genre set up front; a bad name must not
    // destroy the existing links.
    let resolved = match payload.genres.take() {
        Some(names) => Some(resolve_genres(state, &names).await?),
        None => None,
    };

    let existing = db::with_timeout(TvSeriesEntity::find_by_id(id).one(&state.orm)).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound("TV Series")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(total_seasons) = payload.total_seasons {
        active.total_seasons = Set(total_seasons);
    }
    if let Some(total_episodes) = payload.total_episodes {
        active.total_episodes = Set(total_episodes);
    }
    if let Some(first_air_date) = payload.first_air_date {
        active.first_air_date = Set(Some(first_air_date));
    }
    if let Some(last_air_date) = payload.last_air_date {
        active.last_air_date = Set(Some(last_air_date));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(Some(rating));
    }
    if let Some(poster_url) = payload.poster_url {
        active.poster_url = Set(Some(poster_url));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let series = db::with_timeout(active.update(&state.orm)).await?;

    let genre_names = match resolved {
        Some(found) => {
            db::with_timeout(
                TvSeriesGenres::delete_many()
                    .filter(tv_series_genres::Column::SeriesId.eq(series.id))
                    .exec(&state.orm),
            )
            .await?;
            link_genres(state, series.id, found).await?
        }
        None => {
            let mut genre_map = genres_for_series(state, vec![series.id]).await?;
            genre_map.remove(&series.id).unwrap_or_default()
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "tv_series_update",
        Some("tv_series"),
        Some(serde_json::json!({ "series_id": series.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        series_from_entity(series, genre_names),
        "TV Series updated successfully",
    ))
}

pub async fn delete_series(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_editor(user)?;
    // Seasons and episodes cascade at the database level.
    let result = db::with_timeout(TvSeriesEntity::delete_by_id(id).exec(&state.orm)).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("TV Series"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "tv_series_delete",
        Some("tv_series"),
        Some(serde_json::json!({ "series_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("TV Series deleted successfully"))
}

pub async fn list_seasons(state: &AppState, series_id: Uuid) -> AppResult<ApiResponse<SeasonList>> {
    ensure_series_exists(state, series_id).await?;

    let rows = db::with_timeout(
        Seasons::find()
            .filter(seasons::Column::SeriesId.eq(series_id))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&state.orm),
    )
    .await?;

    let items = rows.into_iter().map(season_from_entity).collect();
    Ok(ApiResponse::success(SeasonList { items }))
}

pub async fn create_season(
    state: &AppState,
    user: &AuthUser,
    series_id: Uuid,
    payload: CreateSeasonRequest,
) -> AppResult<ApiResponse<Season>> {
    ensure_editor(user)?;
    validate(&payload)?;
    ensure_series_exists(state, series_id).await?;

    let active = seasons::ActiveModel {
        id: Set(Uuid::new_v4()),
        series_id: Set(series_id),
        season_number: Set(payload.season_number),
        title: Set(payload.title),
        episode_count: Set(payload.episode_count.unwrap_or(0)),
        release_date: Set(payload.release_date),
        description: Set(payload.description),
        poster_url: Set(payload.poster_url),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let season = db::with_timeout(async {
        active
            .insert(&state.orm)
            .await
            .map_err(on_unique("Season number already exists for this series"))
    })
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "season_create",
        Some("seasons"),
        Some(serde_json::json!({ "series_id": series_id, "season_id": season.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        season_from_entity(season),
        "Season created successfully",
    ))
}

pub async fn list_episodes(
    state: &AppState,
    series_id: Uuid,
    season_id: Uuid,
) -> AppResult<ApiResponse<EpisodeList>> {
    ensure_season_in_series(state, series_id, season_id).await?;

    let rows = db::with_timeout(
        Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&state.orm),
    )
    .await?;

    let items = rows.into_iter().map(episode_from_entity).collect();
    Ok(ApiResponse::success(EpisodeList { items }))
}

pub async fn create_episode(
    state: &AppState,
    user: &AuthUser,
    series_id: Uuid,
    season_id: Uuid,
    payload: CreateEpisodeRequest,
) -> AppResult<ApiResponse<Episode>> {
    ensure_editor(user)?;
    validate(&payload)?;
    ensure_season_in_series(state, series_id, season_id).await?;

    let active = episodes::ActiveModel {
        id: Set(Uuid::new_v4()),
        season_id: Set(season_id),
        episode_number: Set(payload.episode_number),
        title: Set(payload.title),
        duration: Set(payload.duration),
        air_date: Set(payload.air_date),
        description: Set(payload.description),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let episode = db::with_timeout(async {
        active
            .insert(&state.orm)
            .await
            .map_err(on_unique("Episode number already exists for this season"))
    })
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "episode_create",
        Some("episodes"),
        Some(serde_json::json!({ "season_id": season_id, "episode_id": episode.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        episode_from_entity(episode),
        "Episode created successfully",
    ))
}

async fn ensure_series_exists(state: &AppState, series_id: Uuid) -> AppResult<()> {
    let exists = db::with_timeout(TvSeriesEntity::find_by_id(series_id).one(&state.orm)).await?;
    if exists.is_none() {
        return Err(AppError::NotFound("TV Series"));
    }
    Ok(())
}

async fn ensure_season_in_series(
    state: &AppState,
    series_id: Uuid,
    season_id: Uuid,
) -> AppResult<()> {
    let season = db::with_timeout(Seasons::find_by_id(season_id).one(&state.orm)).await?;
    match season {
        Some(s) if s.series_id == series_id => Ok(()),
        _ => Err(AppError::NotFound("Season")),
    }
}

async fn genres_for_series(
    state: &AppState,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, String)> = db::with_timeout(
        TvSeriesGenres::find()
            .filter(tv_series_genres::Column::SeriesId.is_in(ids))
            .inner_join(Genres)
            .select_only()
            .column(tv_series_genres::Column::SeriesId)
            .column(genres::Column::Name)
            .into_tuple()
            .all(&state.orm),
    )
    .await?;

    let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (series_id, name) in rows {
        map.entry(series_id).or_default().push(name);
    }
    Ok(map)
}

/// Resolve genre names to rows, failing the request before any write
/// when a name is unknown.
async fn resolve_genres(state: &AppState, names: &[String]) -> AppResult<Vec<genres::Model>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let found = db::with_timeout(
        Genres::find()
            .filter(genres::Column::Name.is_in(names.iter().cloned()))
            .all(&state.orm),
    )
    .await?;

    for name in names {
        if !found.iter().any(|g| &g.name == name) {
            return Err(AppError::BadRequest(format!("Unknown genre: {name}")));
        }
    }

    Ok(found)
}

async fn link_genres(
    state: &AppState,
    series_id: Uuid,
    found: Vec<genres::Model>,
) -> AppResult<Vec<String>> {
    if found.is_empty() {
        return Ok(Vec::new());
    }
    let links = found.iter().map(|g| tv_series_genres::ActiveModel {
        series_id: Set(series_id),
        genre_id: Set(g.id),
    });
    db::with_timeout(TvSeriesGenres::insert_many(links).exec(&state.orm)).await?;

    Ok(found.into_iter().map(|g| g.name).collect())
}

fn series_from_entity(model: SeriesModel, genre_names: Vec<String>) -> TvSeries {
    TvSeries {
        id: model.id,
        title: model.title,
        total_seasons: model.total_seasons,
        total_episodes: model.total_episodes,
        first_air_date: model.first_air_date,
        last_air_date: model.last_air_date,
        description: model.description,
        rating: model.rating,
        poster_url: model.poster_url,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        genres: genre_names,
    }
}

fn season_from_entity(model: seasons::Model) -> Season {
    Season {
        id: model.id,
        series_id: model.series_id,
        season_number: model.season_number,
        title: model.title,
        episode_count: model.episode_count,
        release_date: model.release_date,
        description: model.description,
        poster_url: model.poster_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn episode_from_entity(model: episodes::Model) -> Episode {
    Episode {
        id: model.id,
        season_id: model.season_id,
        episode_number: model.episode_number,
        title: model.title,
        duration: model.duration,
        air_date: model.air_date,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
