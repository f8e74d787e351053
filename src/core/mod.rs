//! Donor model, validation rules, error taxonomy and the storage trait

pub mod donor;
pub mod error;
pub mod store;
pub mod validation;

pub use donor::{Donor, DonorFields, DonorPayload, DonorView, NewDonor};
pub use error::{ApiError, ApiResult, ErrorResponse, RequestError, StoreError, StoreResult};
pub use store::DonorStore;
pub use validation::{JsonBody, validate_donor};
