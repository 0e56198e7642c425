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
    dto::genres::{CreateGenreRequest, GenreList, UpdateGenreRequest},
    dto::validate,
    entity::{
        Genres,
        genres::{ActiveModel, Column, Model as GenreModel},
    },
    error::{AppError, AppResult, on_unique},
    middleware::auth::{AuthUser, ensure_editor},
    models::Genre,
    response::{ApiResponse, PageMeta},
    routes::params::{GenreQuery, GenreSortBy, SortOrder, paginate},
    state::AppState,
};

pub async fn list_genres(state: &AppState, query: GenreQuery) -> AppResult<ApiResponse<GenreList>> {
    let (page, limit, offset) = paginate(query.page, query.limit);

    let mut condition = Condition::all();
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    let sort_col = match query.sort_by.unwrap_or(GenreSortBy::Name) {
        GenreSortBy::Name => Column::Name,
        GenreSortBy::CreatedAt => Column::CreatedAt,
    };

    let mut finder = Genres::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let count_fut = finder.clone().count(&state.orm);
    let data_fut = finder.limit(limit as u64).offset(offset as u64).all(&state.orm);
    let (total, rows) = db::with_timeout(async { tokio::try_join!(count_fut, data_fut) }).await?;

    let items = rows.into_iter().map(genre_from_entity).collect();
    Ok(ApiResponse::paginated(
        GenreList { items },
        PageMeta::new(page, limit, total as i64),
    ))
}

pub async fn get_genre(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Genre>> {
    let genre = db::with_timeout(Genres::find_by_id(id).one(&state.orm)).await?;
    match genre {
        Some(g) => Ok(ApiResponse::success(genre_from_entity(g))),
        None => Err(AppError::NotFound("Genre")),
    }
}

pub async fn create_genre(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGenreRequest,
) -> AppResult<ApiResponse<Genre>> {
    ensure_editor(user)?;
    validate(&payload)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: NotSet,
        updated_at: NotSet,
    };

    // The unique index on name is the sole arbiter of duplicates.
    let genre = db::with_timeout(async {
        active
            .insert(&state.orm)
            .await
            .map_err(on_unique("Genre already exists"))
    })
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "genre_create",
        Some("genres"),
        Some(serde_json::json!({ "genre_id": genre.id, "name": genre.name })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        genre_from_entity(genre),
        "Genre created successfully",
    ))
}

pub async fn update_genre(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateGenreRequest,
) -> AppResult<ApiResponse<Genre>> {
    ensure_editor(user)?;
    validate(&payload)?;

    let existing = db::with_timeout(Genres::find_by_id(id).one(&state.orm)).await?;
    let existing = match existing {
        Some(g) => g,
        None => return Err(AppError::NotFound("Genre")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(Utc::now().into());

    let genre = db::with_timeout(async {
        active
            .update(&state.orm)
            .await
            .map_err(on_unique("Genre name already exists"))
    })
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "genre_update",
        Some("genres"),
        Some(serde_json::json!({ "genre_id": genre.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        genre_from_entity(genre),
        "Genre updated successfully",
    ))
}

pub async fn delete_genre(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_editor(user)?;
    // Junction rows go with it via ON DELETE CASCADE.
    let result = db::with_timeout(Genres::delete_by_id(id).exec(&state.orm)).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Genre"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "genre_delete",
        Some("genres"),
        Some(serde_json::json!({ "genre_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Genre deleted successfully"))
}

fn genre_from_entity(model: GenreModel) -> Genre {
    Genre {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
