use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic `{ "message": ... }` payload used for acks and errors.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
