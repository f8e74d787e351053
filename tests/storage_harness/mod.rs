//! Shared test harness for donor store and REST testing
//!
//! Provides sample donors plus two macro-generated suites:
//! `donor_store_tests!` (the `DonorStore` contract) and
//! `rest_integration_tests!` (the HTTP API over a given store).
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! donor_store_tests!(InMemoryDonorStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod donor_store_tests;

use chrono::NaiveDate;
use serde_json::{Value, json};

use donor_registry::core::donor::{DonorFields, NewDonor};

// ---------------------------------------------------------------------------
// Model helpers
// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Valid replaceable fields for a donor called `name`
pub fn sample_fields(name: &str) -> DonorFields {
    DonorFields {
        full_name: name.to_string(),
        phone: "+1 555 0100".to_string(),
        birth_date: date(1990, 5, 17),
        gender: "female".to_string(),
        address: Some("12 Harbor Road".to_string()),
        number_of_donations: 2,
    }
}

/// A donor ready for insertion with an explicit `generated_id`
pub fn sample_donor(generated_id: &str, name: &str) -> NewDonor {
    NewDonor {
        generated_id: generated_id.to_string(),
        fields: sample_fields(name),
    }
}

/// `count` donors with distinct generated ids
pub fn sample_batch(count: usize) -> Vec<NewDonor> {
    (0..count)
        .map(|i| sample_donor(&format!("DN-BATCH-{:03}", i), &format!("Donor {}", i)))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

/// A complete create payload with a caller-chosen `generatedId`
pub fn donor_json(generated_id: &str, name: &str) -> Value {
    json!({
        "fullName": name,
        "phone": "+1 555 0100",
        "birthDate": "1990-05-17",
        "gender": "female",
        "address": "12 Harbor Road",
        "generatedId": generated_id,
        "numberOfDonations": 2
    })
}

/// A complete create payload without `generatedId`
pub fn donor_json_without_id(name: &str) -> Value {
    json!({
        "fullName": name,
        "phone": "+1 555 0199",
        "birthDate": "1985-12-01",
        "gender": "male"
    })
}

/// `DN` followed by a 14 digit timestamp
pub fn is_generated_donor_id(value: &str) -> bool {
    value.len() == 16
        && value.starts_with("DN")
        && value[2..].chars().all(|c| c.is_ascii_digit())
}
