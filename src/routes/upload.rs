use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::upload::UploadData,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_editor},
    response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/poster", post(upload_poster))
        .route("/cover-art", post(upload_cover))
        .route("/audio", post(upload_audio))
}

#[utoipa::path(
    post,
    path = "/api/v1/upload/poster",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Poster stored", body = ApiResponse<UploadData>),
        (status = 400, description = "No file uploaded"),
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_poster(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadData>>)> {
    store_upload(&state, &user, multipart, "poster", "Poster uploaded successfully").await
}

#[utoipa::path(
    post,
    path = "/api/v1/upload/cover-art",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Cover art stored", body = ApiResponse<UploadData>),
        (status = 400, description = "No file uploaded"),
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_cover(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadData>>)> {
    store_upload(&state, &user, multipart, "cover", "Cover art uploaded successfully").await
}

#[utoipa::path(
    post,
    path = "/api/v1/upload/audio",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Audio file stored", body = ApiResponse<UploadData>),
        (status = 400, description = "No file uploaded"),
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_audio(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadData>>)> {
    store_upload(&state, &user, multipart, "audio", "Audio file uploaded successfully").await
}

/// Writes the first matching multipart field to disk under a fresh
/// uuid name, keeping only the original extension.
async fn store_upload(
    state: &AppState,
    user: &AuthUser,
    mut multipart: Multipart,
    field_name: &str,
    message: &'static str,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadData>>)> {
    ensure_editor(user)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Invalid multipart payload: {err}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let original = field.file_name().unwrap_or("file").to_string();
        let extension = std::path::Path::new(&original)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let filename = format!("{field_name}-{}{extension}", Uuid::new_v4());

        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Upload failed: {err}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        }

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(anyhow::Error::from)?;
        let path = std::path::Path::new(&state.config.upload_dir).join(&filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(anyhow::Error::from)?;

        if let Err(err) = log_audit(
            &state.pool,
            Some(user.user_id),
            "file_upload",
            Some("uploads"),
            Some(serde_json::json!({ "filename": filename, "kind": field_name })),
        )
        .await
        {
            tracing::warn!(error = %err, "audit log failed");
        }

        let data = UploadData {
            url: format!("/uploads/{filename}"),
            filename,
        };
        return Ok((
            StatusCode::CREATED,
            Json(ApiResponse::with_message(data, message)),
        ));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
