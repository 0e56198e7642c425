use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod calendar_events;
pub mod doc;
pub mod genres;
pub mod health;
pub mod movies;
pub mod params;
pub mod songs;
pub mod tv_series;
pub mod upload;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/tv-series", tv_series::router())
        .nest("/songs", songs::router())
        .nest("/genres", genres::router())
        .nest("/calendar-events", calendar_events::router())
        .nest("/upload", upload::router())
}
