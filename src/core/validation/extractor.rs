//! Axum extractor for JSON request bodies
//!
//! [`JsonBody<T>`] behaves like `axum::Json<T>` but rejects with the API's
//! own error body, and treats an empty or `null` body as missing instead of
//! malformed.

use crate::core::error::{ApiError, RequestError};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Axum extractor that decodes a required JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_donor(
///     State(state): State<AppState>,
///     JsonBody(payload): JsonBody<DonorPayload>,
/// ) -> ApiResult<impl IntoResponse> {
///     // payload is present and well-formed, but not yet validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            let status = e.status();
            let message = e.body_text();
            // keep 413 and friends; only plain read failures are the client's JSON
            if status == StatusCode::BAD_REQUEST {
                ApiError::from(RequestError::InvalidJson { message })
            } else {
                ApiError::from(RequestError::BodyRejected { status, message })
            }
        })?;

        decode_body(&bytes).map(JsonBody).map_err(ApiError::from)
    }
}

/// Decode a raw body, separating "nothing sent" from "garbage sent"
pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RequestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::MissingBody);
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| RequestError::InvalidJson {
        message: e.to_string(),
    })?;

    if value.is_null() {
        return Err(RequestError::MissingBody);
    }

    serde_json::from_value(value).map_err(|e| RequestError::InvalidJson {
        message: e.to_string(),
    })
}
