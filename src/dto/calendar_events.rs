use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CalendarEvent;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarEventRequest {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub event_date: DateTime<Utc>,
    #[garde(inner(length(max = 255)))]
    pub location: Option<String>,
    #[garde(length(min = 1, max = 50))]
    pub event_type: String,
    #[garde(inner(custom(super::valid_event_status)))]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalendarEventRequest {
    #[garde(inner(length(min = 1, max = 255)))]
    pub title: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub event_date: Option<DateTime<Utc>>,
    #[garde(inner(length(max = 255)))]
    pub location: Option<String>,
    #[garde(inner(length(min = 1, max = 50)))]
    pub event_type: Option<String>,
    #[garde(inner(custom(super::valid_event_status)))]
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CalendarEventList {
    #[schema(value_type = Vec<CalendarEvent>)]
    pub items: Vec<CalendarEvent>,
}
