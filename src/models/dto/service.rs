use crate::models::Service;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewService {
    pub name: String,
    pub description: String,
    #[schema(example = 60)]
    pub duration: u32,
    #[schema(example = 500.0)]
    pub price: f64,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub duration: u32,
    pub price: f64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            owner_id: service.owner_id,
            name: service.name,
            description: service.description,
            duration: service.duration,
            price: service.price,
            created_at: service.created_at.to_string(),
            updated_at: service.updated_at.map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotQuery {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
}
