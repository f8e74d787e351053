//! HTTP server: handlers, routes and the `ServerBuilder` that layers them
//!
//! The builder wires a [`DonorStore`](crate::core::store::DonorStore) into the
//! donor routes and wraps them with tracing, CORS and request timeouts.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, DONOR_BASE_PATH, HealthResponse, MessageResponse};
pub use router::{build_donor_routes, donor_path};
