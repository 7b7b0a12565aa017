pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::SequenceError;
pub use models::*;
pub use services::*;
pub use router::sequence_routes;
