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
    dto::movies::{CreateMovieRequest, MovieList, UpdateMovieRequest},
    dto::validate,
    entity::{
        Genres, MovieGenres, Movies, genres, movie_genres,
        movies::{ActiveModel, Column, Model as MovieModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_editor},
    models::Movie,
    response::{ApiResponse, PageMeta},
    routes::params::{MovieQuery, MovieSortBy, SortOrder, paginate},
    state::AppState,
};

pub async fn list_movies(state: &AppState, query: MovieQuery) -> AppResult<ApiResponse<MovieList>> {
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

    let sort_col = match query.sort_by.unwrap_or(MovieSortBy::CreatedAt) {
        MovieSortBy::CreatedAt => Column::CreatedAt,
        MovieSortBy::Title => Column::Title,
        MovieSortBy::ReleaseDate => Column::ReleaseDate,
        MovieSortBy::Rating => Column::Rating,
        MovieSortBy::Duration => Column::Duration,
    };

    let mut finder = Movies::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    // Count and page fetch share the predicate but are independent
    // reads; fan out and join.
    let count_fut = finder.clone().count(&state.orm);
    let data_fut = finder.limit(limit as u64).offset(offset as u64).all(&state.orm);
    let (total, rows) = db::with_timeout(async { tokio::try_join!(count_fut, data_fut) }).await?;

    let mut genre_map = genres_for_movies(state, rows.iter().map(|m| m.id).collect()).await?;
    let items = rows
        .into_iter()
        .map(|m| {
            let genre_names = genre_map.remove(&m.id).unwrap_or_default();
            movie_from_entity(m, genre_names)
        })
        .collect();

    Ok(ApiResponse::paginated(
        MovieList { items },
        PageMeta::new(page, limit, total as i64),
    ))
}

pub async fn get_movie(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Movie>> {
    let movie = db::with_timeout(Movies::find_by_id(id).one(&state.orm)).await?;
    let movie = match movie {
        Some(m) => m,
        None => return Err(AppError::NotFound("Movie")),
    };

    let mut genre_map = genres_for_movies(state, vec![movie.id]).await?;
    let genre_names = genre_map.remove(&movie.id).unwrap_or_default();
    Ok(ApiResponse::success(movie_from_entity(movie, genre_names)))
}

pub async fn create_movie(
    state: &AppState,
    user: &AuthUser,
    mut payload: CreateMovieRequest,
) -> AppResult<ApiResponse<Movie>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve genre names before touching the movies table so a bad
    // name rejects the request without leaving a half-created row.
    let names = payload.genres.take().unwrap_or_default();
    let resolved = resolve_genres(state, &names).await?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        release_date: Set(payload.release_date),
        duration: Set(payload.duration),
        director: Set(payload.director),
        description: Set(payload.description),
        rating: Set(payload.rating),
        poster_url: Set(payload.poster_url),
        status: Set(payload.status.unwrap_or_else(|| "active".to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let movie = db::with_timeout(active.insert(&state.orm)).await?;

    let genre_names = link_genres(state, movie.id, resolved).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "movie_create",
        Some("movies"),
        Some(serde_json::json!({ "movie_id": movie.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        movie_from_entity(movie, genre_names),
        "Movie created successfully",
    ))
}

pub async fn update_movie(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    mut payload: UpdateMovieRequest,
) -> AppResult<ApiResponse<Movie>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve the replacement genre set up front; a bad name must not
    // destroy the existing links.
    let resolved = match payload.genres.take() {
        Some(names) => Some(resolve_genres(state, &names).await?),
        None => None,
    };

    let existing = db::with_timeout(Movies::find_by_id(id).one(&state.orm)).await?;
    let existing = match existing {
        Some(m) => m,
        None => return Err(AppError::NotFound("Movie")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(release_date) = payload.release_date {
        active.release_date = Set(Some(release_date));
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(Some(duration));
    }
    if let Some(director) = payload.director {
        active.director = Set(Some(director));
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

    let movie = db::with_timeout(active.update(&state.orm)).await?;

    let genre_names = match resolved {
        Some(found) => {
            db::with_timeout(
                MovieGenres::delete_many()
                    .filter(movie_genres::Column::MovieId.eq(movie.id))
                    .exec(&state.orm),
            )
            .await?;
            link_genres(state, movie.id, found).await?
        }
        None => {
            let mut genre_map = genres_for_movies(state, vec![movie.id]).await?;
            genre_map.remove(&movie.id).unwrap_or_default()
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "movie_update",
        Some("movies"),
        Some(serde_json::json!({ "movie_id": movie.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        movie_from_entity(movie, genre_names),
        "Movie updated successfully",
    ))
}

pub async fn delete_movie(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_editor(user)?;
    let result = db::with_timeout(Movies::delete_by_id(id).exec(&state.orm)).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Movie"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "movie_delete",
        Some("movies"),
        Some(serde_json::json!({ "movie_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Movie deleted successfully"))
}

/// One batched junction query for the whole page, grouped in memory.
async fn genres_for_movies(
    state: &AppState,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, String)> = db::with_timeout(
        MovieGenres::find()
            .filter(movie_genres::Column::MovieId.is_in(ids))
            .inner_join(Genres)
            .select_only()
            .column(movie_genres::Column::MovieId)
            .column(genres::Column::Name)
            .into_tuple()
            .all(&state.orm),
    )
    .await?;

    let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (movie_id, name) in rows {
        map.entry(movie_id).or_default().push(name);
    }
    Ok(map)
}

/// Resolve genre names to rows. Unknown names are a client error, not
/// a silent skip, and they fail the request before any write happens.
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

/// Insert the junction set for an already-resolved genre list.
async fn link_genres(
    state: &AppState,
    movie_id: Uuid,
    found: Vec<genres::Model>,
) -> AppResult<Vec<String>> {
    if found.is_empty() {
        return Ok(Vec::new());
    }
    let links = found.iter().map(|g| movie_genres::ActiveModel {
        movie_id: Set(movie_id),
        genre_id: Set(g.id),
    });
    db::with_timeout(MovieGenres::insert_many(links).exec(&state.orm)).await?;

    Ok(found.into_iter().map(|g| g.name).collect())
}

fn movie_from_entity(model: MovieModel, genre_names: Vec<String>) -> Movie {
    Movie {
        id: model.id,
        title: model.title,
        release_date: model.release_date,
        duration: model.duration,
        director: model.director,
        description: model.description,
        rating: model.rating,
        poster_url: model.poster_url,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        genres: genre_names,
    }
}
