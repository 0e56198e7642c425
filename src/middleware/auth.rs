use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, error::AppError};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: String,
}

/// Roles allowed to hit mutating routes. Read routes are public.
pub const EDITOR_ROLES: [&str; 2] = ["admin", "super_admin"];

pub fn ensure_editor(user: &AuthUser) -> Result<(), AppError> {
    if EDITOR_ROLES.contains(&user.role.as_str()) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized);
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        let claims = decode_token(token, &secret)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(AuthUser {
            user_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::issue_token;

    #[test]
    fn editor_roles_gate_mutations() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            username: "admin".into(),
            role: "admin".into(),
        };
        let super_admin = AuthUser {
            role: "super_admin".into(),
            ..admin.clone()
        };
        let viewer = AuthUser {
            role: "viewer".into(),
            ..admin.clone()
        };
        assert!(ensure_editor(&admin).is_ok());
        assert!(ensure_editor(&super_admin).is_ok());
        assert!(matches!(ensure_editor(&viewer), Err(AppError::Forbidden)));
    }

    #[test]
    fn token_round_trip() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "rosa", "admin", "sekrit", 1).unwrap();
        let claims = decode_token(&token, "sekrit").unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.username, "rosa");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = issue_token(Uuid::new_v4(), "rosa", "admin", "sekrit", 1).unwrap();
        assert!(matches!(
            decode_token(&token, "other"),
            Err(AppError::Unauthorized)
        ));
    }
}
