use chrono::{Days, NaiveTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db,
    dto::calendar_events::{
        CalendarEventList, CreateCalendarEventRequest, UpdateCalendarEventRequest,
    },
    dto::validate,
    entity::{
        CalendarEvents,
        calendar_events::{ActiveModel, Column, Model as EventModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_editor},
    models::CalendarEvent,
    response::{ApiResponse, PageMeta},
    routes::params::{CalendarEventQuery, CalendarEventSortBy, SortOrder, paginate},
    state::AppState,
};

pub async fn list_events(
    state: &AppState,
    query: CalendarEventQuery,
) -> AppResult<ApiResponse<CalendarEventList>> {
    let (page, limit, offset) = paginate(query.page, query.limit);

    let mut condition = Condition::all();
    if let Some(event_type) = query.event_type.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::EventType.eq(event_type.clone()));
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(status.clone()));
    }
    // Both bounds are inclusive of the named day.
    if let Some(start_date) = query.start_date {
        let start = start_date
            .and_time(NaiveTime::MIN)
            .and_utc();
        condition = condition.add(Column::EventDate.gte(start));
    }
    if let Some(end_date) = query.end_date {
        let end = end_date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::BadRequest("Invalid end date".to_string()))?
            .and_time(NaiveTime::MIN)
            .and_utc();
        condition = condition.add(Column::EventDate.lt(end));
    }

    let sort_col = match query.sort_by.unwrap_or(CalendarEventSortBy::EventDate) {
        CalendarEventSortBy::EventDate => Column::EventDate,
        CalendarEventSortBy::CreatedAt => Column::CreatedAt,
        CalendarEventSortBy::Title => Column::Title,
    };

    let mut finder = CalendarEvents::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let count_fut = finder.clone().count(&state.orm);
    let data_fut = finder.limit(limit as u64).offset(offset as u64).all(&state.orm);
    let (total, rows) = db::with_timeout(async { tokio::try_join!(count_fut, data_fut) }).await?;

    let items = rows.into_iter().map(event_from_entity).collect();
    Ok(ApiResponse::paginated(
        CalendarEventList { items },
        PageMeta::new(page, limit, total as i64),
    ))
}

pub async fn get_event(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CalendarEvent>> {
    let event = db::with_timeout(CalendarEvents::find_by_id(id).one(&state.orm)).await?;
    match event {
        Some(e) => Ok(ApiResponse::success(event_from_entity(e))),
        None => Err(AppError::NotFound("Calendar event")),
    }
}

pub async fn create_event(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCalendarEventRequest,
) -> AppResult<ApiResponse<CalendarEvent>> {
    ensure_editor(user)?;
    validate(&payload)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        event_date: Set(payload.event_date.into()),
        location: Set(payload.location),
        event_type: Set(payload.event_type),
        status: Set(payload.status.unwrap_or_else(|| "scheduled".to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let event = db::with_timeout(active.insert(&state.orm)).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "calendar_event_create",
        Some("calendar_events"),
        Some(serde_json::json!({ "event_id": event.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        event_from_entity(event),
        "Calendar event created successfully",
    ))
}

pub async fn update_event(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCalendarEventRequest,
) -> AppResult<ApiResponse<CalendarEvent>> {
    ensure_editor(user)?;
    validate(&payload)?;

    let existing = db::with_timeout(CalendarEvents::find_by_id(id).one(&state.orm)).await?;
    let existing = match existing {
        Some(e) => e,
        None => return Err(AppError::NotFound("Calendar event")),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(event_date) = payload.event_date {
        active.event_date = Set(event_date.into());
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(event_type) = payload.event_type {
        active.event_type = Set(event_type);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let event = db::with_timeout(active.update(&state.orm)).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "calendar_event_update",
        Some("calendar_events"),
        Some(serde_json::json!({ "event_id": event.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        event_from_entity(event),
        "Calendar event updated successfully",
    ))
}

pub async fn delete_event(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_editor(user)?;
    let result = db::with_timeout(CalendarEvents::delete_by_id(id).exec(&state.orm)).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Calendar event"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "calendar_event_delete",
        Some("calendar_events"),
        Some(serde_json::json!({ "event_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Calendar event deleted successfully"))
}

fn event_from_entity(model: EventModel) -> CalendarEvent {
    CalendarEvent {
        id: model.id,
        title: model.title,
        description: model.description,
        event_date: model.event_date.with_timezone(&Utc),
        location: model.location,
        event_type: model.event_type,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
