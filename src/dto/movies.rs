use chrono::NaiveDate;
use garde::Validate;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Movie;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub release_date: Option<NaiveDate>,
    #[garde(inner(range(min = 1)))]
    pub duration: Option<i32>,
    #[garde(inner(length(max = 255)))]
    pub director: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(range(min = 0.0, max = 10.0)))]
    pub rating: Option<f64>,
    #[garde(inner(length(max = 500)))]
    pub poster_url: Option<String>,
    #[garde(inner(custom(super::valid_media_status)))]
    pub status: Option<String>,
    /// Genre names; resolved against the genres table.
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    #[garde(inner(length(min = 1, max = 255)))]
    pub title: Option<String>,
    #[garde(skip)]
    pub release_date: Option<NaiveDate>,
    #[garde(inner(range(min = 1)))]
    pub duration: Option<i32>,
    #[garde(inner(length(max = 255)))]
    pub director: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(range(min = 0.0, max = 10.0)))]
    pub rating: Option<f64>,
    #[garde(inner(length(max = 500)))]
    pub poster_url: Option<String>,
    #[garde(inner(custom(super::valid_media_status)))]
    pub status: Option<String>,
    /// When present, replaces the movie's genre links.
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct MovieList {
    #[schema(value_type = Vec<Movie>)]
    pub items: Vec<Movie>,
}
