use keepsake_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool},
    dto::{
        genres::CreateGenreRequest,
        movies::{CreateMovieRequest, UpdateMovieRequest},
        tv_series::{CreateEpisodeRequest, CreateSeasonRequest, CreateTvSeriesRequest},
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{GenreQuery, MovieQuery, MovieSortBy, SortOrder},
    services::{genre_service, movie_service, tv_series_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

// Integration flow: editor seeds genres, manages movies end to end, then
// builds out a series with a season and an episode.
#[tokio::test]
async fn genre_movie_and_series_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let editor = create_user(&state, "admin").await?;
    let viewer = AuthUser {
        user_id: Uuid::new_v4(),
        username: "lurker".into(),
        role: "viewer".into(),
    };

    // Genres: create once, duplicate must hit the DB unique constraint.
    genre_service::create_genre(
        &state,
        &editor,
        CreateGenreRequest {
            name: "Romance".into(),
            description: Some("Love stories".into()),
        },
    )
    .await?;
    let duplicate = genre_service::create_genre(
        &state,
        &editor,
        CreateGenreRequest {
            name: "Romance".into(),
            description: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // A non-editor cannot mutate.
    let forbidden = genre_service::create_genre(
        &state,
        &viewer,
        CreateGenreRequest {
            name: "Drama".into(),
            description: None,
        },
    )
    .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    // Movie referencing an unknown genre is rejected up front.
    let unknown = movie_service::create_movie(
        &state,
        &editor,
        movie_payload("The Notebook", Some(vec!["Noir".into()])),
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));

    // The rejected create must not leave a row behind.
    let after_reject = movie_service::list_movies(
        &state,
        MovieQuery {
            page: None,
            limit: None,
            status: None,
            search: Some("notebook".into()),
            sort_by: None,
            sort_order: None,
        },
    )
    .await?;
    assert_eq!(after_reject.pagination.unwrap().total, 0);

    // Rating outside 0..=10 fails validation with a field detail.
    let mut bad_rating = movie_payload("Titanic", None);
    bad_rating.rating = Some(10.1);
    let invalid = movie_service::create_movie(&state, &editor, bad_rating).await;
    match invalid {
        Err(AppError::Validation(details)) => {
            assert!(details.iter().any(|d| d.field.contains("rating")));
        }
        Err(other) => panic!("expected validation error, got {other:?}"),
        Ok(_) => panic!("expected validation error, got success"),
    }

    // Happy path create carries genre names back.
    let created = movie_service::create_movie(
        &state,
        &editor,
        movie_payload("The Notebook", Some(vec!["Romance".into()])),
    )
    .await?;
    let movie = created.data.unwrap();
    assert_eq!(movie.genres, vec!["Romance".to_string()]);

    // Second movie so search and sorting have something to chew on.
    movie_service::create_movie(&state, &editor, movie_payload("Casablanca", None)).await?;

    let listed = movie_service::list_movies(
        &state,
        MovieQuery {
            page: Some(1),
            limit: Some(1),
            status: None,
            search: Some("notebook".into()),
            sort_by: Some(MovieSortBy::Title),
            sort_order: Some(SortOrder::Asc),
        },
    )
    .await?;
    let pagination = listed.pagination.unwrap();
    assert_eq!(pagination.total, 1);
    assert_eq!(listed.data.unwrap().items[0].title, "The Notebook");

    // Hostile limit is clamped rather than honored.
    let clamped = movie_service::list_movies(
        &state,
        MovieQuery {
            page: Some(1),
            limit: Some(5000),
            status: None,
            search: None,
            sort_by: None,
            sort_order: None,
        },
    )
    .await?;
    assert_eq!(clamped.pagination.unwrap().limit, 100);

    // A rejected genre replacement must leave the existing links alone.
    let failed_update = movie_service::update_movie(
        &state,
        &editor,
        movie.id,
        UpdateMovieRequest {
            title: None,
            release_date: None,
            duration: None,
            director: None,
            description: None,
            rating: None,
            poster_url: None,
            status: None,
            genres: Some(vec!["Nope".into()]),
        },
    )
    .await;
    assert!(matches!(failed_update, Err(AppError::BadRequest(_))));
    let still_linked = movie_service::get_movie(&state, movie.id).await?;
    assert_eq!(
        still_linked.data.unwrap().genres,
        vec!["Romance".to_string()]
    );

    // Update swaps the genre set.
    let updated = movie_service::update_movie(
        &state,
        &editor,
        movie.id,
        UpdateMovieRequest {
            title: None,
            release_date: None,
            duration: None,
            director: None,
            description: None,
            rating: Some(9.5),
            poster_url: None,
            status: None,
            genres: Some(vec![]),
        },
    )
    .await?;
    let updated = updated.data.unwrap();
    assert_eq!(updated.rating, Some(9.5));
    assert!(updated.genres.is_empty());

    // Delete is idempotent only in the sense that the second call 404s.
    movie_service::delete_movie(&state, &editor, movie.id).await?;
    let gone = movie_service::delete_movie(&state, &editor, movie.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
    let fetch = movie_service::get_movie(&state, movie.id).await;
    assert!(matches!(fetch, Err(AppError::NotFound(_))));

    // Series -> season -> episode nesting.
    let series = tv_series_service::create_series(
        &state,
        &editor,
        CreateTvSeriesRequest {
            title: "Pride and Prejudice".into(),
            total_seasons: None,
            total_episodes: None,
            first_air_date: None,
            last_air_date: None,
            description: None,
            rating: None,
            poster_url: None,
            status: None,
            genres: Some(vec!["Romance".into()]),
        },
    )
    .await?;
    let series = series.data.unwrap();
    assert_eq!(series.total_seasons, 1);

    let season = tv_series_service::create_season(
        &state,
        &editor,
        series.id,
        CreateSeasonRequest {
            season_number: 1,
            title: Some("Series One".into()),
            episode_count: None,
            release_date: None,
            description: None,
            poster_url: None,
        },
    )
    .await?;
    let season = season.data.unwrap();

    // Season numbers are unique per series; the constraint answers 409.
    let duplicate_season = tv_series_service::create_season(
        &state,
        &editor,
        series.id,
        CreateSeasonRequest {
            season_number: 1,
            title: None,
            episode_count: None,
            release_date: None,
            description: None,
            poster_url: None,
        },
    )
    .await;
    assert!(matches!(duplicate_season, Err(AppError::Conflict(_))));

    tv_series_service::create_episode(
        &state,
        &editor,
        series.id,
        season.id,
        CreateEpisodeRequest {
            episode_number: 1,
            title: "Episode 1".into(),
            duration: Some(55),
            air_date: None,
            description: None,
        },
    )
    .await?;

    // Episodes are scoped to their series; a foreign series id 404s.
    let mismatched =
        tv_series_service::list_episodes(&state, Uuid::new_v4(), season.id).await;
    assert!(matches!(mismatched, Err(AppError::NotFound(_))));

    let detail = tv_series_service::get_series(&state, series.id).await?;
    let detail = detail.data.unwrap();
    assert_eq!(detail.seasons.len(), 1);
    assert_eq!(detail.series.genres, vec!["Romance".to_string()]);

    let episodes = tv_series_service::list_episodes(&state, series.id, season.id).await?;
    assert_eq!(episodes.data.unwrap().items.len(), 1);

    // Deleting the series cascades down to seasons and episodes.
    tv_series_service::delete_series(&state, &editor, series.id).await?;
    let orphaned = tv_series_service::list_seasons(&state, series.id).await;
    assert!(matches!(orphaned, Err(AppError::NotFound(_))));

    // Genre list still paginates after all of the above.
    let genres = genre_service::list_genres(
        &state,
        GenreQuery {
            page: None,
            limit: None,
            search: None,
            sort_by: None,
            sort_order: None,
        },
    )
    .await?;
    assert_eq!(genres.pagination.unwrap().total, 1);

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE audit_logs, movie_genres, tv_series_genres, song_genres, episodes, \
         seasons, movies, tv_series, songs, calendar_events, genres, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    let orm = orm_from_pool(pool.clone());
    let config = AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_expires_hours: 1,
        gate_user: None,
        gate_pass: None,
        upload_dir: "./uploads".into(),
        max_upload_bytes: 1024 * 1024,
    };

    Ok(Some(AppState { pool, orm, config }))
}

async fn create_user(state: &AppState, role: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(format!("{role}-user")),
        email: Set(format!("{role}@example.com")),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        is_active: Set(true),
        last_login: NotSet,
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        role: user.role,
    })
}

fn movie_payload(title: &str, genres: Option<Vec<String>>) -> CreateMovieRequest {
    CreateMovieRequest {
        title: title.into(),
        release_date: None,
        duration: Some(120),
        director: None,
        description: Some("A love story".into()),
        rating: Some(8.0),
        poster_url: None,
        status: None,
        genres,
    }
}
