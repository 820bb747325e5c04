pub mod booking;
pub mod message;
pub mod service;
pub mod user;
pub use booking::*;
pub use message::Message;
pub use service::*;
pub use user::*;

use crate::availability::SlotStatus;
use crate::models::{BookingStatus, Role, Session, SessionUser};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            SignupInfo,
            LoginInfo,
            AuthResponse,
            SessionUser,
            Session,
            NewService,
            UpdateService,
            ServiceResponse,
            NewBooking,
            BookingResponse,
            SlotStatus,
            Role,
            BookingStatus,
            Message,
        ),
    ),
    modifiers(&SecurityAddon)
)]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;

pub struct SecurityAddon;
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components: &mut utoipa::openapi::Components = openapi.components.as_mut().unwrap(); // we can unwrap safely since there already is components registered.
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}
