use crate::models::{Booking, BookingStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewBooking {
    pub service_id: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(example = "2025-06-01")]
    pub date: String,
    #[schema(example = "10:00 AM")]
    pub time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: String,
    pub service_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            service_id: booking.service_id,
            user_id: booking.user_id,
            user_name: booking.user_name,
            user_email: booking.user_email,
            date: booking.date.format("%Y-%m-%d").to_string(),
            time: booking.time,
            status: booking.status,
            created_at: booking.created_at.to_string(),
        }
    }
}
