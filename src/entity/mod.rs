pub mod audit_logs;
pub mod calendar_events;
pub mod episodes;
pub mod genres;
pub mod movie_genres;
pub mod movies;
pub mod seasons;
pub mod song_genres;
pub mod songs;
pub mod tv_series;
pub mod tv_series_genres;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use calendar_events::Entity as CalendarEvents;
pub use episodes::Entity as Episodes;
pub use genres::Entity as Genres;
pub use movie_genres::Entity as MovieGenres;
pub use movies::Entity as Movies;
pub use seasons::Entity as Seasons;
pub use song_genres::Entity as SongGenres;
pub use songs::Entity as Songs;
pub use tv_series::Entity as TvSeries;
pub use tv_series_genres::Entity as TvSeriesGenres;
pub use users::Entity as Users;
