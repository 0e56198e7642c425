pub mod auth;
pub mod calendar_events;
pub mod genres;
pub mod movies;
pub mod songs;
pub mod tv_series;
pub mod upload;

use garde::Validate;

use crate::error::{AppError, AppResult, FieldError};

/// Run garde validation and translate failures into the 400 envelope
/// with per-field details.
pub fn validate<T: Validate<Context = ()>>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|report| {
        let details = report
            .iter()
            .map(|(path, error)| FieldError {
                field: path.to_string(),
                message: error.to_string(),
            })
            .collect();
        AppError::Validation(details)
    })
}

pub const MEDIA_STATUSES: [&str; 3] = ["active", "inactive", "coming_soon"];
pub const SERIES_STATUSES: [&str; 4] = ["active", "inactive", "coming_soon", "ended"];
pub const EVENT_STATUSES: [&str; 4] = ["scheduled", "cancelled", "completed", "postponed"];
pub const ROLES: [&str; 2] = ["admin", "super_admin"];

pub(crate) fn valid_media_status<T: AsRef<str>>(value: &T, _ctx: &()) -> garde::Result {
    one_of(value.as_ref(), &MEDIA_STATUSES)
}

pub(crate) fn valid_series_status<T: AsRef<str>>(value: &T, _ctx: &()) -> garde::Result {
    one_of(value.as_ref(), &SERIES_STATUSES)
}

pub(crate) fn valid_event_status<T: AsRef<str>>(value: &T, _ctx: &()) -> garde::Result {
    one_of(value.as_ref(), &EVENT_STATUSES)
}

pub(crate) fn valid_role<T: AsRef<str>>(value: &T, _ctx: &()) -> garde::Result {
    one_of(value.as_ref(), &ROLES)
}

fn one_of(value: &str, allowed: &[&str]) -> garde::Result {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "must be one of: {}",
            allowed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::movies::CreateMovieRequest;

    #[test]
    fn rating_bounds_are_inclusive() {
        let mut req = CreateMovieRequest {
            title: "Before Sunrise".into(),
            release_date: None,
            duration: None,
            director: None,
            description: None,
            rating: Some(0.0),
            poster_url: None,
            status: None,
            genres: None,
        };
        assert!(validate(&req).is_ok());
        req.rating = Some(10.0);
        assert!(validate(&req).is_ok());
        req.rating = Some(10.1);
        assert!(validate(&req).is_err());
        req.rating = Some(-0.1);
        assert!(validate(&req).is_err());
    }

    #[test]
    fn empty_title_rejected_with_field_detail() {
        let req = CreateMovieRequest {
            title: String::new(),
            release_date: None,
            duration: None,
            director: None,
            description: None,
            rating: None,
            poster_url: None,
            status: None,
            genres: None,
        };
        match validate(&req) {
            Err(AppError::Validation(details)) => {
                assert!(details.iter().any(|d| d.field == "title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_rejected() {
        let req = CreateMovieRequest {
            title: "Amelie".into(),
            release_date: None,
            duration: None,
            director: None,
            description: None,
            rating: None,
            poster_url: None,
            status: Some("archived".into()),
            genres: None,
        };
        assert!(validate(&req).is_err());
    }
}
