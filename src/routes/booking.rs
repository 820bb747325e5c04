use std::sync::Arc;

use axum::{
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use utoipa::OpenApi;

use crate::{
    availability,
    gate::{self, Access},
    models::{
        dto::{BookingResponse, NewBooking},
        Booking, BookingStatus, Error, Role, TokenClaim,
    },
    repository::generate_id,
    AppState,
};

use super::middlewares::auth_guard;

/// Defines the OpenAPI spec for booking endpoints
#[derive(OpenApi)]
#[openapi(paths(
    create_booking_handler,
    list_bookings_handler,
    cancel_booking_handler
))]
pub struct BookingsApi;

/// Used to group booking endpoints together in the OpenAPI documentation
pub const BOOKING_API_GROUP: &str = "BOOKING";

/// Builds a router for booking routes
pub fn booking_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_bookings_handler).post(create_booking_handler),
        )
        .route("/:id", axum::routing::delete(cancel_booking_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
}

/// Create booking handler function
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = BOOKING_API_GROUP,
    request_body = NewBooking,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingResponse),
        (status = 303, description = "Caller is not a client; steered to their home view"),
        (status = 400, description = "Date outside the window or unknown slot label"),
        (status = 404, description = "Service not found"),
        (status = 409, description = "Slot already held by a confirmed booking"),
    )
)]
pub async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
    Json(body): Json<NewBooking>,
) -> Result<Response, Error> {
    if let Access::RedirectTo(view) = gate::route_access(Some(claim.role), Some(Role::User)) {
        return Ok(Redirect::to(view.path()).into_response());
    }

    // A booking may only ever reference a service that exists right now;
    // afterwards the delete cascade keeps the reference valid.
    if state.repo.get_service_by_id(&body.service_id).is_none() {
        return Err(Error::not_found("Service not found"));
    }
    let date = NaiveDate::parse_from_str(&body.date, "%Y-%m-%d")
        .map_err(|_| Error::validation("Invalid date"))?;
    let today = Utc::now().date_naive();
    if !availability::within_booking_window(date, today) {
        return Err(Error::validation("Date is outside the booking window"));
    }
    if !availability::is_canonical_slot(&body.time) {
        return Err(Error::validation("Unknown time slot"));
    }
    let bookings = state.repo.list_bookings();
    if availability::slot_taken(&bookings, &body.service_id, date, &body.time) {
        return Err(Error::conflict("This slot is already booked"));
    }

    let booking = state.repo.create_booking(Booking {
        id: generate_id("bkg"),
        service_id: body.service_id,
        user_id: claim.sub.clone(),
        user_name: claim.name.clone(),
        user_email: claim.email.clone(),
        date,
        time: body.time,
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    });

    Ok(Json(BookingResponse::from(booking)).into_response())
}

/// List bookings handler function
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_API_GROUP,
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Bookings visible to the caller", body = [BookingResponse]),
    )
)]
pub async fn list_bookings_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
) -> Json<Vec<BookingResponse>> {
    // Owners see bookings across their services; clients see their own.
    let bookings = match claim.role {
        Role::Owner => state.repo.bookings_by_owner(&claim.sub),
        Role::User => state.repo.bookings_by_user(&claim.sub),
    };
    Json(bookings.into_iter().map(BookingResponse::from).collect())
}

/// Cancel booking handler function
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = BOOKING_API_GROUP,
    params(
        ("id" = String, Path, description = "The ID of the booking to cancel")
    ),
    security(
        ("bearerAuth" = [])
    ),
    responses(
        (status = 200, description = "Booking cancelled; the record is retained", body = BookingResponse),
        (status = 404, description = "Booking not found"),
    )
)]
pub async fn cancel_booking_handler(
    State(state): State<Arc<AppState>>,
    Extension(claim): Extension<TokenClaim>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, Error> {
    state
        .repo
        .get_booking_by_id(&id)
        .filter(|b| b.user_id == claim.sub)
        .ok_or_else(|| Error::not_found("Booking not found"))?;

    let cancelled = state
        .repo
        .cancel_booking(&id)
        .ok_or_else(|| Error::not_found("Booking not found"))?;
    Ok(Json(BookingResponse::from(cancelled)))
}
