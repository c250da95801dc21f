pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use router::api_router;
pub use server::{start_server, ApiServer};
