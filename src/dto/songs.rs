use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Song;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(length(min = 1, max = 255))]
    pub artist: String,
    #[garde(inner(length(max = 255)))]
    pub album: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub duration: Option<i32>,
    #[garde(skip)]
    pub release_date: Option<NaiveDate>,
    #[garde(skip)]
    pub lyrics: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub cover_art_url: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub audio_url: Option<String>,
    #[garde(inner(custom(super::valid_media_status)))]
    pub status: Option<String>,
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    #[garde(inner(length(min = 1, max = 255)))]
    pub title: Option<String>,
    #[garde(inner(length(min = 1, max = 255)))]
    pub artist: Option<String>,
    #[garde(inner(length(max = 255)))]
    pub album: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub duration: Option<i32>,
    #[garde(skip)]
    pub release_date: Option<NaiveDate>,
    #[garde(skip)]
    pub lyrics: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub cover_art_url: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub audio_url: Option<String>,
    #[garde(inner(custom(super::valid_media_status)))]
    pub status: Option<String>,
    #[garde(skip)]
    pub genres: Option<Vec<String>>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SongList {
    #[schema(value_type = Vec<Song>)]
    pub items: Vec<Song>,
}
