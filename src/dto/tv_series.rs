use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Episode, Season, TvSeries};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTvSeriesRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(inner(range(min = 0)))]
    pub total_seasons: Option<i32>,
    #[garde(inner(range(min = 0)))]
    pub total_episodes: Option<i32>,
    #[garde(skip)]
    pub first_air_date: Option<NaiveDate>,
    #[garde(skip)]
    pub last_air_date: Option<NaiveDate>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(range(min = 0.0, max = 10.0)))]
    pub rating: Option<f64>,
    #[garde(inner(length(max = 500)))]
    pub poster_url: Option<String>,
    #[garde(inner(custom(super::valid_series_status)))]
    pub status: Option<String>,
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTvSeriesRequest {
    #[garde(inner(length(min = 1, max = 255)))]
    pub title: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub total_seasons: Option<i32>,
    #[garde(inner(range(min = 0)))]
    pub total_episodes: Option<i32>,
    #[garde(skip)]
    pub first_air_date: Option<NaiveDate>,
    #[garde(skip)]
    pub last_air_date: Option<NaiveDate>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(range(min = 0.0, max = 10.0)))]
    pub rating: Option<f64>,
    #[garde(inner(length(max = 500)))]
    pub poster_url: Option<String>,
    #[garde(inner(custom(super::valid_series_status)))]
    pub status: Option<String>,
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonRequest {
    #[garde(range(min = 1))]
    pub season_number: i32,
    #[garde(inner(length(max = 255)))]
    pub title: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub episode_count: Option<i32>,
    #[garde(skip)]
    pub release_date: Option<NaiveDate>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub poster_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEpisodeRequest {
    #[garde(range(min = 1))]
    pub episode_number: i32,
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(inner(range(min = 1)))]
    pub duration: Option<i32>,
    #[garde(skip)]
    pub air_date: Option<NaiveDate>,
    #[garde(skip)]
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct TvSeriesList {
    #[schema(value_type = Vec<TvSeries>)]
    pub items: Vec<TvSeries>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SeasonList {
    #[schema(value_type = Vec<Season>)]
    pub items: Vec<Season>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct EpisodeList {
    #[schema(value_type = Vec<Episode>)]
    pub items: Vec<Episode>,
}
