use crate::models::{Role, SessionUser};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupInfo {
    pub name: String,
    pub email: String,
    pub password: String,
    #[schema(example = "user")]
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginInfo {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
    pub message: String,
}
