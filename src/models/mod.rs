pub mod booking;
pub mod dto;
pub mod error;
pub mod service;
pub mod session;
pub mod token_claim;
pub mod user;
pub use booking::{Booking, BookingStatus};
pub use error::Error;
pub use service::Service;
pub use session::{Session, SessionUser};
pub use token_claim::TokenClaim;
pub use user::{Role, User};
