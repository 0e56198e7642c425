use garde::Validate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PublicUser;

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct RegisterRequest {
    #[garde(length(min = 3, max = 50))]
    pub username: String,
    #[garde(email, length(max = 255))]
    pub email: String,
    #[garde(length(min = 8, max = 128))]
    pub password: String,
    #[garde(inner(custom(super::valid_role)))]
    pub role: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(min = 1))]
    pub password: String,
}

/// Login success keeps the original top-level shape: `{ success, user,
/// token }`, not the generic data envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginSuccess {
    pub success: bool,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: usize,
}
