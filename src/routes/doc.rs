use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginSuccess, RegisterRequest},
        calendar_events::{CalendarEventList, CreateCalendarEventRequest, UpdateCalendarEventRequest},
        genres::{CreateGenreRequest, GenreList, UpdateGenreRequest},
        movies::{CreateMovieRequest, MovieList, UpdateMovieRequest},
        songs::{CreateSongRequest, SongList, UpdateSongRequest},
        tv_series::{
            CreateEpisodeRequest, CreateSeasonRequest, CreateTvSeriesRequest, EpisodeList,
            SeasonList, TvSeriesList, UpdateTvSeriesRequest,
        },
        upload::UploadData,
    },
    models::{
        CalendarEvent, Episode, Genre, Movie, PublicUser, Season, Song, TvSeries, TvSeriesDetail,
    },
    response::{ApiResponse, PageMeta},
    routes::{auth, calendar_events, genres, health, movies, songs, tv_series, upload},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::profile,
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        tv_series::list_series,
        tv_series::get_series,
        tv_series::create_series,
        tv_series::update_series,
        tv_series::delete_series,
        tv_series::list_seasons,
        tv_series::create_season,
        tv_series::list_episodes,
        tv_series::create_episode,
        songs::list_songs,
        songs::get_song,
        songs::create_song,
        songs::update_song,
        songs::delete_song,
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        calendar_events::list_events,
        calendar_events::get_event,
        calendar_events::create_event,
        calendar_events::update_event,
        calendar_events::delete_event,
        upload::upload_poster,
        upload::upload_cover,
        upload::upload_audio
    ),
    components(
        schemas(
            PublicUser,
            Genre,
            Movie,
            TvSeries,
            TvSeriesDetail,
            Season,
            Episode,
            Song,
            CalendarEvent,
            LoginRequest,
            LoginSuccess,
            RegisterRequest,
            CreateMovieRequest,
            UpdateMovieRequest,
            MovieList,
            CreateTvSeriesRequest,
            UpdateTvSeriesRequest,
            TvSeriesList,
            CreateSeasonRequest,
            SeasonList,
            CreateEpisodeRequest,
            EpisodeList,
            CreateSongRequest,
            UpdateSongRequest,
            SongList,
            CreateGenreRequest,
            UpdateGenreRequest,
            GenreList,
            CreateCalendarEventRequest,
            UpdateCalendarEventRequest,
            CalendarEventList,
            UploadData,
            PageMeta,
            health::HealthData,
            health::DatabaseStatus,
            ApiResponse<Movie>,
            ApiResponse<MovieList>,
            ApiResponse<TvSeriesDetail>,
            ApiResponse<GenreList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Movies", description = "Movie catalog endpoints"),
        (name = "TV Series", description = "Series, season and episode endpoints"),
        (name = "Songs", description = "Song catalog endpoints"),
        (name = "Genres", description = "Genre endpoints"),
        (name = "Calendar", description = "Calendar event endpoints"),
        (name = "Upload", description = "Media upload endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
