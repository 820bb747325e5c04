use crate::models::{Role, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The public identity carried inside a session and in token responses.
/// Never includes the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// The single persisted "who is currently acting" record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}
