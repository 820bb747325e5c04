use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use utoipa::OpenApi;

use crate::{
    availability::{self, SlotStatus},
    gate::{self, Access},
    models::{
        dto::{NewService, ServiceResponse, SlotQuery, UpdateService},
        Error, Role, Service, TokenClaim,
    },
    repository::{generate_id, ServicePatch},
    AppState,
};

use super::middlewares::auth_guard;

/// Defines the OpenAPI spec for service endpoints
#[derive(OpenApi)]
#[openapi(paths(
    list_services_handler,
    list_own_services_handler,
    get_service_handler,
    create_service_handler,
    update_service_handler,
    delete_service_handler,
    get_slots_handler
))]
pub struct ServicesApi;

/// Used to group service endpoints together in the OpenAPI documentation
pub const SERVICE_API_GROUP: &str = "SERVICE";

/// Builds a router for service routes
pub fn service_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_services_handler).post(create_service_handler),
        )
        .route("/mine", get(list_own_services_handler))
        .route(
            "/:id",
            get(get_service_handler)
                .put(update_service_handler)
                .delete(delete_service_handler),
        )
        .route("/:id/slots", get(get_slots_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
}

/// Soft redirect for role mismatches: the actor lands on their own home
/// view instead of receiving a denial.
fn owner_gate(claim: &TokenClaim) -> Option<Response> {
    match gate::route_access(Some(claim.role), Some(Role::Owner)) {
        Access::Permit => None,
        Access::RedirectTo(view) => Some(Redirect::to(view.path()).into_response()),
    }
}

fn validate_fields(
    name: Option<&str>,
    description: Option<&str>,
    duration: Option<u32>,
    price: Option<f64>,
) -> Result<(), Error> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(Error::validation("Service name is required"));
        }
    }
    if let Some(description) = description {
        if description.trim().is_empty() {
            return Err(Error::validation("Description is required"));
        }
    }
    if let Some(duration) = duration {
        if duration < 1 {
            return Err(Error::validation("Duration must be at least 1 minute"));
        }
    }
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::validation("Price must be a non-negative number"));
        }
    }
    Ok(())
}

/// List services handler function
#[utoipa::path(
    get,
    path = "/api/services",
    tag = SERVICE_API_GROUP,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "All listed services", body = [ServiceResponse]),
    )
)]
pub async fn list_services_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ServiceResponse>> {
    let services = state
        .repo
        .list_services()
        .into_iter()
        .map(ServiceResponse::from)
        .collect();
    Json(services)
}

/// List own services handler function
#[utoipa::path(
    get,
    path = "/api/services/mine",
    tag = SERVICE_API_GROUP,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Services belonging to the caller", body = [ServiceResponse]),
        (status = 303, description = "Caller is not an owner; steered to their home view"),
    )
)]
pub async fn list_own_services_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
) -> Result<Response, Error> {
    if let Some(redirect) = owner_gate(&claim) {
        return Ok(redirect);
    }
    let services: Vec<ServiceResponse> = state
        .repo
        .services_by_owner(&claim.sub)
        .into_iter()
        .map(ServiceResponse::from)
        .collect();
    Ok(Json(services).into_response())
}

/// Get service by ID handler function
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = SERVICE_API_GROUP,
    security(
        ("bearerAuth" = [])
    ),
    params(
        ("id" = String, Path, description = "The ID of the service to fetch")
    ),
    responses(
        (status = 200, description = "Service successfully fetched", body = ServiceResponse),
        (status = 404, description = "Service not found"),
    )
)]
pub async fn get_service_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, Error> {
    if let Some(service) = state.repo.get_service_by_id(&id) {
        Ok(Json(ServiceResponse::from(service)))
    } else {
        Err(Error::not_found("Service not found"))
    }
}

/// Create service handler function
#[utoipa::path(
    post,
    path = "/api/services",
    tag = SERVICE_API_GROUP,
    request_body = NewService,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Service successfully created", body = ServiceResponse),
        (status = 303, description = "Caller is not an owner; steered to their home view"),
        (status = 400, description = "Missing or malformed fields"),
    )
)]
pub async fn create_service_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
    Json(body): Json<NewService>,
) -> Result<Response, Error> {
    if let Some(redirect) = owner_gate(&claim) {
        return Ok(redirect);
    }
    validate_fields(
        Some(&body.name),
        Some(&body.description),
        Some(body.duration),
        Some(body.price),
    )?;

    let service = state.repo.create_service(Service {
        id: generate_id("svc"),
        owner_id: claim.sub.clone(),
        name: body.name.trim().to_string(),
        description: body.description.trim().to_string(),
        duration: body.duration,
        price: body.price,
        created_at: Utc::now(),
        updated_at: None,
    });

    Ok(Json(ServiceResponse::from(service)).into_response())
}

/// Update service handler function
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = SERVICE_API_GROUP,
    params(
        ("id" = String, Path, description = "The ID of the service to update")
    ),
    request_body = UpdateService,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Service successfully updated", body = ServiceResponse),
        (status = 404, description = "Service not found"),
    )
)]
pub async fn update_service_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
    Path(id): Path<String>,
    Json(body): Json<UpdateService>,
) -> Result<Response, Error> {
    if let Some(redirect) = owner_gate(&claim) {
        return Ok(redirect);
    }
    let service = state
        .repo
        .get_service_by_id(&id)
        .filter(|s| s.owner_id == claim.sub)
        .ok_or_else(|| Error::not_found("Service not found"))?;

    validate_fields(
        body.name.as_deref(),
        body.description.as_deref(),
        body.duration,
        body.price,
    )?;

    let patch = ServicePatch {
        name: body.name,
        description: body.description,
        duration: body.duration,
        price: body.price,
    };
    let updated = state
        .repo
        .update_service(&service.id, patch)
        .ok_or_else(|| Error::not_found("Service not found"))?;
    Ok(Json(ServiceResponse::from(updated)).into_response())
}

/// Delete service handler function
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = SERVICE_API_GROUP,
    params(
        ("id" = String, Path, description = "The ID of the service to delete")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Service and its bookings deleted"),
        (status = 404, description = "Service not found"),
    )
)]
pub async fn delete_service_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    if let Some(redirect) = owner_gate(&claim) {
        return Ok(redirect);
    }
    state
        .repo
        .get_service_by_id(&id)
        .filter(|s| s.owner_id == claim.sub)
        .ok_or_else(|| Error::not_found("Service not found"))?;

    // Removes the service together with every booking referencing it.
    state.repo.delete_service(&id);
    Ok(Json(crate::models::dto::Message::new("Service deleted")).into_response())
}

/// Get available slots handler function
#[utoipa::path(
    get,
    path = "/api/services/{id}/slots",
    tag = SERVICE_API_GROUP,
    params(
        ("id" = String, Path, description = "The ID of the service"),
        SlotQuery
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Offered slots in canonical order", body = [SlotStatus]),
        (status = 400, description = "Date missing or outside the booking window"),
        (status = 404, description = "Service not found"),
    )
)]
pub async fn get_slots_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Vec<SlotStatus>>, Error> {
    if state.repo.get_service_by_id(&id).is_none() {
        return Err(Error::not_found("Service not found"));
    }
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| Error::validation("Invalid date"))?;
    let today = Utc::now().date_naive();
    if !availability::within_booking_window(date, today) {
        return Err(Error::validation("Date is outside the booking window"));
    }
    let bookings = state.repo.list_bookings();
    Ok(Json(availability::available_slots(&bookings, &id, date)))
}
