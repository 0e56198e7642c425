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
    dto::songs::{CreateSongRequest, SongList, UpdateSongRequest},
    dto::validate,
    entity::{
        Genres, SongGenres, Songs, genres, song_genres,
        songs::{ActiveModel, Column, Model as SongModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_editor},
    models::Song,
    response::{ApiResponse, PageMeta},
    routes::params::{SongQuery, SongSortBy, SortOrder, paginate},
    state::AppState,
};

pub async fn list_songs(state: &AppState, query: SongQuery) -> AppResult<ApiResponse<SongList>> {
    let (page, limit, offset) = paginate(query.page, query.limit);

    let mut condition = Condition::all();
    if let Some(artist) = query.artist.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Artist.eq(artist.clone()));
    }
    if let Some(album) = query.album.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Album.eq(album.clone()));
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(status.clone()));
    }
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Title).ilike(pattern.clone()))
                .add(Expr::col(Column::Artist).ilike(pattern)),
        );
    }

    let sort_col = match query.sort_by.unwrap_or(SongSortBy::CreatedAt) {
        SongSortBy::CreatedAt => Column::CreatedAt,
        SongSortBy::Title => Column::Title,
        SongSortBy::Artist => Column::Artist,
        SongSortBy::Album => Column::Album,
        SongSortBy::ReleaseDate => Column::ReleaseDate,
    };

    let mut finder = Songs::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let count_fut = finder.clone().count(&state.orm);
    let data_fut = finder.limit(limit as u64).offset(offset as u64).all(&state.orm);
    let (total, rows) = db::with_timeout(async { tokio::try_join!(count_fut, data_fut) }).await?;

    let mut genre_map = genres_for_songs(state, rows.iter().map(|s| s.id).collect()).await?;
    let items = rows
        .into_iter()
        .map(|s| {
            let genre_names = genre_map.remove(&s.id).unwrap_or_default();
            song_from_entity(s, genre_names)
        })
        .collect();

    Ok(ApiResponse::paginated(
        SongList { items },
        PageMeta::new(page, limit, total as i64),
    ))
}

pub async fn get_song(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Song>> {
    let song = db::with_timeout(Songs::find_by_id(id).one(&state.orm)).await?;
    let song = match song {
        Some(s) => s,
        None => return Err(AppError::NotFound("Song")),
    };

    let mut genre_map = genres_for_songs(state, vec![song.id]).await?;
    let genre_names = genre_map.remove(&song.id).unwrap_or_default();
    Ok(ApiResponse::success(song_from_entity(song, genre_names)))
}

pub async fn create_song(
    state: &AppState,
    user: &AuthUser,
    mut payload: CreateSongRequest,
) -> AppResult<ApiResponse<Song>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve genre names before touching the songs table so a bad
    // name rejects the request without leaving a half-created row.
    let names = payload.genres.take().unwrap_or_default();
    let resolved = resolve_genres(state, &names).await?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        artist: Set(payload.artist),
        album: Set(payload.album),
        duration: Set(payload.duration),
        release_date: Set(payload.release_date),
        lyrics: Set(payload.lyrics),
        cover_art_url: Set(payload.cover_art_url),
        audio_url: Set(payload.audio_url),
        status: Set(payload.status.unwrap_or_else(|| "active".to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let song = db::with_timeout(active.insert(&state.orm)).await?;

    let genre_names = link_genres(state, song.id, resolved).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "song_create",
        Some("songs"),
        Some(serde_json::json!({ "song_id": song.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        song_from_entity(song, genre_names),
        "Song created successfully",
    ))
}

pub async fn update_song(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    mut payload: UpdateSongRequest,
) -> AppResult<ApiResponse<Song>> {
    ensure_editor(user)?;
    validate(&payload)?;

    // Resolve the replacement genre set up front; a bad name must not
    // destroy the existing links.
    let resolved = match payload.genres.take() {
        Some(names) => Some(resolve_genres(state, &names).await?),
        None => None,
    };

    let existing = db::with_timeout(Songs::find_by_id(id).one(&state.orm)).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound("Song")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(artist) = payload.artist {
        active.artist = Set(artist);
    }
    if let Some(album) = payload.album {
        active.album = Set(Some(album));
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(Some(duration));
    }
    if let Some(release_date) = payload.release_date {
        active.release_date = Set(Some(release_date));
    }
    if let Some(lyrics) = payload.lyrics {
        active.lyrics = Set(Some(lyrics));
    }
    if let Some(cover_art_url) = payload.cover_art_url {
        active.cover_art_url = Set(Some(cover_art_url));
    }
    if let Some(audio_url) = payload.audio_url {
        active.audio_url = Set(Some(audio_url));
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let song = db::with_timeout(active.update(&state.orm)).await?;

    let genre_names = match resolved {
        Some(found) => {
            db::with_timeout(
                SongGenres::delete_many()
                    .filter(song_genres::Column::SongId.eq(song.id))
                    .exec(&state.orm),
            )
            .await?;
            link_genres(state, song.id, found).await?
        }
        None => {
            let mut genre_map = genres_for_songs(state, vec![song.id]).await?;
            genre_map.remove(&song.id).unwrap_or_default()
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "song_update",
        Some("songs"),
        Some(serde_json::json!({ "song_id": song.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        song_from_entity(song, genre_names),
        "Song updated successfully",
    ))
}

pub async fn delete_song(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_editor(user)?;
    let result = db::with_timeout(Songs::delete_by_id(id).exec(&state.orm)).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Song"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "song_delete",
        Some("songs"),
        Some(serde_json::json!({ "song_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Song deleted successfully"))
}

async fn genres_for_songs(
    state: &AppState,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, String)> = db::with_timeout(
        SongGenres::find()
            .filter(song_genres::Column::SongId.is_in(ids))
            .inner_join(Genres)
            .select_only()
            .column(song_genres::Column::SongId)
            .column(genres::Column::Name)
            .into_tuple()
            .all(&state.orm),
    )
    .await?;

    let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (song_id, name) in rows {
        map.entry(song_id).or_default().push(name);
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
    song_id: Uuid,
    found: Vec<genres::Model>,
) -> AppResult<Vec<String>> {
    if found.is_empty() {
        return Ok(Vec::new());
    }
    let links = found.iter().map(|g| song_genres::ActiveModel {
        song_id: Set(song_id),
        genre_id: Set(g.id),
    });
    db::with_timeout(SongGenres::insert_many(links).exec(&state.orm)).await?;

    Ok(found.into_iter().map(|g| g.name).collect())
}

fn song_from_entity(model: SongModel, genre_names: Vec<String>) -> Song {
    Song {
        id: model.id,
        title: model.title,
        artist: model.artist,
        album: model.album,
        duration: model.duration,
        release_date: model.release_date,
        lyrics: model.lyrics,
        cover_art_url: model.cover_art_url,
        audio_url: model.audio_url,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        genres: genre_names,
    }
}
