use crate::models::Role;
use serde::{Deserialize, Serialize};

/// JWT claims: the acting identity plus the standard validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaim {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}
