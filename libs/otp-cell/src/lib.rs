pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::{NotificationError, OtpError};
pub use models::*;
pub use services::*;
pub use router::otp_routes;
