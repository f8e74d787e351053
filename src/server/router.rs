//! Router builder for donor routes

use crate::server::handlers::{
    AppState, DONOR_BASE_PATH, create_donor, delete_donor, get_donor, health_check, list_donors,
    update_donor,
};
use axum::{Router, routing::get};

/// Path of a single donor, as used in the `Location` header
pub fn donor_path(id: i64) -> String {
    format!("{}/{}", DONOR_BASE_PATH, id)
}

/// Build the donor routes
///
/// - GET /api/donor - List donors
/// - POST /api/donor - Create a donor
/// - GET /api/donor/health - Service and database health
/// - GET /api/donor/{id} - Get a donor
/// - PUT /api/donor/{id} - Update a donor
/// - DELETE /api/donor/{id} - Delete a donor
pub fn build_donor_routes(state: AppState) -> Router {
    let health = format!("{}/health", DONOR_BASE_PATH);
    let item = format!("{}/{{id}}", DONOR_BASE_PATH);

    Router::new()
        .route(DONOR_BASE_PATH, get(list_donors).post(create_donor))
        .route(&health, get(health_check))
        .route(
            &item,
            get(get_donor).put(update_donor).delete(delete_donor),
        )
        .with_state(state)
}
