pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::ScheduleError;
pub use models::*;
pub use services::*;
pub use router::{block_routes, event_routes};
