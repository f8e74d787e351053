//! # Donor Registry
//!
//! A REST backend for keeping blood donor records.
//!
//! ## Features
//!
//! - **CRUD over `/api/donor`**: list, fetch, create, replace and delete donors
//! - **Aggregated validation**: every missing required field reported at once
//! - **Server-generated identifiers**: `DN` + timestamp when none is supplied
//! - **Computed age**: derived from the birth date on every read
//! - **Pluggable storage**: PostgreSQL via `sqlx`, or an in-memory store
//! - **Health probe**: `/api/donor/health` reports database connectivity
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use donor_registry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryDonorStore::new())
//!         .serve("127.0.0.1:8080")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{AppConfig, DatabaseConfig, ServerConfig};
    pub use crate::core::{
        ApiError, ApiResult, Donor, DonorFields, DonorPayload, DonorStore, DonorView, NewDonor,
        RequestError, StoreError, StoreResult,
    };
    pub use crate::server::{AppState, ServerBuilder, build_donor_routes};
    pub use crate::storage::InMemoryDonorStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresDonorStore;
}
