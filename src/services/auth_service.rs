use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db,
    dto::auth::{Claims, LoginRequest, LoginSuccess, RegisterRequest},
    dto::validate,
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_editor},
    models::PublicUser,
    response::ApiResponse,
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn issue_token(
    user_id: Uuid,
    username: &str,
    role: &str,
    secret: &str,
    expires_hours: i64,
) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(expires_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<LoginSuccess> {
    validate(&payload)?;
    let LoginRequest { username, password } = payload;

    let user = db::with_timeout(
        Users::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .one(&state.orm),
    )
    .await?;

    // One uniform rejection: never reveal which of the checks failed.
    let user = match user {
        Some(u) if u.is_active => u,
        _ => return Err(AppError::Unauthorized),
    };

    if !verify_password(&password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(
        user.id,
        &user.username,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expires_hours,
    )?;

    let mut active: users::ActiveModel = user.clone().into();
    active.last_login = Set(Some(Utc::now().into()));
    active.updated_at = Set(Utc::now().into());
    let user = db::with_timeout(active.update(&state.orm)).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "username": user.username })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(LoginSuccess {
        success: true,
        user: user.into(),
        token,
    })
}

/// Registration is gated by the same editor role check as every other
/// mutating route; a bare bearer header is not enough.
pub async fn register(
    state: &AppState,
    user: &AuthUser,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<PublicUser>> {
    ensure_editor(user)?;
    validate(&payload)?;

    let password_hash = hash_password(&payload.password)?;
    let active = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(payload.username),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        role: Set(payload.role.unwrap_or_else(|| "admin".to_string())),
        is_active: Set(true),
        last_login: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    };

    // The unique indexes on username and email decide conflicts; no
    // read-then-write probe.
    let created = db::with_timeout(async {
        active.insert(&state.orm).await.map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                let message = if detail.contains("email") {
                    "Email already exists"
                } else {
                    "Username already exists"
                };
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Orm(err),
        })
    })
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "created_user_id": created.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::with_message(
        created.into(),
        "User created successfully",
    ))
}

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PublicUser>> {
    let found = db::with_timeout(Users::find_by_id(user.user_id).one(&state.orm)).await?;
    match found {
        Some(u) => Ok(ApiResponse::success(u.into())),
        None => Err(AppError::NotFound("User")),
    }
}
