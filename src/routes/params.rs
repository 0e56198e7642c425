use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Normalize caller-supplied pagination: page floors at 1, limit is
/// clamped to [1, MAX_LIMIT], offset derived from both.
pub fn paginate(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = (page - 1) * limit;
    (page, limit, offset)
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

// Sort keys are fixed enumerations per entity; caller strings never
// reach identifier position in a query.

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MovieSortBy {
    CreatedAt,
    Title,
    ReleaseDate,
    Rating,
    Duration,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TvSeriesSortBy {
    CreatedAt,
    Title,
    FirstAirDate,
    Rating,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SongSortBy {
    CreatedAt,
    Title,
    Artist,
    Album,
    ReleaseDate,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum GenreSortBy {
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CalendarEventSortBy {
    EventDate,
    CreatedAt,
    Title,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovieQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<MovieSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TvSeriesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<TvSeriesSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SongQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SongSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GenreQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<GenreSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CalendarEventQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub sort_by: Option<CalendarEventSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        assert_eq!(paginate(None, None), (1, 10, 0));
    }

    #[test]
    fn clamps_hostile_input() {
        assert_eq!(paginate(Some(-3), Some(0)), (1, 1, 0));
        assert_eq!(paginate(Some(0), Some(100_000)), (1, MAX_LIMIT, 0));
    }

    #[test]
    fn offset_arithmetic() {
        assert_eq!(paginate(Some(2), Some(5)), (2, 5, 5));
        assert_eq!(paginate(Some(4), Some(25)), (4, 25, 75));
    }
}
