pub mod auth_service;
pub mod calendar_service;
pub mod genre_service;
pub mod movie_service;
pub mod song_service;
pub mod tv_series_service;
