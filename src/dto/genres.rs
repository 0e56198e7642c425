use garde::Validate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Genre;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGenreRequest {
    #[garde(length(min = 1, max = 50))]
    pub name: String,
    #[garde(inner(length(max = 500)))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateGenreRequest {
    #[garde(inner(length(min = 1, max = 50)))]
    pub name: Option<String>,
    #[garde(inner(length(max = 500)))]
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct GenreList {
    #[schema(value_type = Vec<Genre>)]
    pub items: Vec<Genre>,
}
