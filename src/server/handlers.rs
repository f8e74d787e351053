//! HTTP handlers for donor operations
//!
//! Handlers only sequence the steps of each request (parse, validate, one
//! store call at a time) and translate failures into [`ApiError`]s.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::core::donor::{Donor, DonorPayload, DonorView, NewDonor, generate_donor_id};
use crate::core::error::{ApiError, ApiResult, RequestError, StoreError, StoreResult};
use crate::core::store::DonorStore;
use crate::core::validation::JsonBody;
use crate::server::router::donor_path;

/// Base path of every donor route
pub const DONOR_BASE_PATH: &str = "/api/donor";

/// Timestamps a server-generated `generatedId` may try before giving up
const GENERATED_ID_ATTEMPTS: i64 = 60;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DonorStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DonorStore>) -> Self {
        Self { store }
    }
}

/// Body returned by delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}

fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.trim().parse().map_err(|_| RequestError::InvalidId {
        value: raw.to_string(),
    })
}

/// List every donor
///
/// GET /api/donor
pub async fn list_donors(State(state): State<AppState>) -> ApiResult<Json<Vec<DonorView>>> {
    let today = Local::now().date_naive();
    let donors = state.store.list_all().await?;

    Ok(Json(
        donors
            .into_iter()
            .map(|donor| donor.into_view_at(today))
            .collect(),
    ))
}

/// Get one donor
///
/// GET /api/donor/{id}
pub async fn get_donor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DonorView>> {
    let id = parse_id(&raw_id)?;
    let donor = state.store.find_by_id(id).await?;
    Ok(Json(donor.into_view()))
}

/// Create a donor
///
/// POST /api/donor
///
/// Responds 201 with a `Location` header pointing at the new record. A
/// client-supplied `generatedId` that is taken is a 409; a server-generated
/// one moves to the next free second instead.
pub async fn create_donor(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DonorPayload>,
) -> ApiResult<impl IntoResponse> {
    let now = Local::now().naive_local();
    let client_chose_id = payload.has_generated_id();
    let new_donor = payload
        .into_new_donor(now)
        .map_err(ApiError::Validation)?;

    let donor = if client_chose_id {
        state.store.insert(new_donor).await?
    } else {
        insert_with_generated_id(state.store.as_ref(), new_donor, now).await?
    };
    tracing::info!(id = donor.id, generated_id = %donor.generated_id, "donor created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, donor_path(donor.id))],
        Json(donor.into_view()),
    ))
}

/// Insert, stepping the generated id one second forward on each conflict
pub async fn insert_with_generated_id(
    store: &dyn DonorStore,
    mut new_donor: NewDonor,
    now: NaiveDateTime,
) -> StoreResult<Donor> {
    let mut offset = 0;
    loop {
        match store.insert(new_donor.clone()).await {
            Err(StoreError::Conflict { .. }) if offset + 1 < GENERATED_ID_ATTEMPTS => {
                offset += 1;
                new_donor.generated_id = generate_donor_id(now + TimeDelta::seconds(offset));
                tracing::debug!(generated_id = %new_donor.generated_id, "generated id taken, retrying");
            }
            result => return result,
        }
    }
}

/// Replace a donor's mutable fields
///
/// PUT /api/donor/{id}
///
/// The payload must carry the same `id` as the path. `generatedId` in the
/// payload is ignored.
pub async fn update_donor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<DonorPayload>,
) -> ApiResult<Json<DonorView>> {
    let id = parse_id(&raw_id)?;
    if payload.id != Some(id) {
        return Err(RequestError::IdMismatch {
            path_id: id,
            body_id: payload.id,
        }
        .into());
    }

    let fields = payload.into_fields().map_err(ApiError::Validation)?;

    state.store.find_by_id(id).await?;
    let donor = state.store.update(id, fields).await?;
    tracing::debug!(id, "donor updated");

    Ok(Json(donor.into_view()))
}

/// Delete a donor
///
/// DELETE /api/donor/{id}
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&raw_id)?;

    state.store.find_by_id(id).await?;
    state.store.delete(id).await?;
    tracing::info!(id, "donor deleted");

    Ok(Json(MessageResponse {
        message: format!("Donor with id '{}' deleted successfully", id),
    }))
}

/// Report service and database health
///
/// GET /api/donor/health
///
/// Always 200; a failed probe is reported in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.store.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "database health probe failed");
            ("unhealthy", "disconnected")
        }
    };

    Json(HealthResponse {
        status,
        database,
        timestamp: Utc::now(),
    })
}
