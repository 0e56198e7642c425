use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{db, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct DatabaseStatus {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseStatus,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Liveness plus database probe", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match db::ping(&state.pool).await {
        Ok(()) => DatabaseStatus {
            success: true,
            message: "Database connection successful".to_string(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "health probe failed");
            DatabaseStatus {
                success: false,
                message: "Database connection failed".to_string(),
            }
        }
    };

    Json(HealthData {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        database,
    })
}
