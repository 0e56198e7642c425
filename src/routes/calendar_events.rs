use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::calendar_events::{
        CalendarEventList, CreateCalendarEventRequest, UpdateCalendarEventRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::CalendarEvent,
    response::ApiResponse,
    routes::params::CalendarEventQuery,
    services::calendar_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar-events",
    params(CalendarEventQuery),
    responses(
        (status = 200, description = "Paginated calendar events", body = ApiResponse<CalendarEventList>),
    ),
    tag = "Calendar"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<CalendarEventQuery>,
) -> AppResult<Json<ApiResponse<CalendarEventList>>> {
    let resp = calendar_service::list_events(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar-events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event by id", body = ApiResponse<CalendarEvent>),
        (status = 404, description = "Event not found"),
    ),
    tag = "Calendar"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CalendarEvent>>> {
    let resp = calendar_service::get_event(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/calendar-events",
    request_body = CreateCalendarEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<CalendarEvent>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCalendarEventRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CalendarEvent>>)> {
    let resp = calendar_service::create_event(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/calendar-events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = UpdateCalendarEventRequest,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<CalendarEvent>),
        (status = 404, description = "Event not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCalendarEventRequest>,
) -> AppResult<Json<ApiResponse<CalendarEvent>>> {
    let resp = calendar_service::update_event(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/calendar-events/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 404, description = "Event not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Calendar"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = calendar_service::delete_event(&state, &user, id).await?;
    Ok(Json(resp))
}
