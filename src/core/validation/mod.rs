//! Donor payload validation
//!
//! [`validate_donor`] is the single rule set applied to every write. It runs
//! all field rules and returns every violation at once, in field order.

pub mod extractor;
pub mod validators;

pub use extractor::JsonBody;

use crate::core::donor::DonorPayload;

/// Check the donor fields, returning one message per violation
///
/// Required-field rules come first, then the NUL check on every text field
/// (Postgres `TEXT` cannot store `\0`).
pub fn validate_donor(payload: &DonorPayload) -> Vec<String> {
    let text = validators::non_empty();
    let date = validators::not_zero_date();
    let no_nul = validators::no_nul();

    [
        text("Full name", payload.full_name.as_deref()),
        text("Phone", payload.phone.as_deref()),
        text("Gender", payload.gender.as_deref()),
        date("Birth date", payload.birth_date),
        no_nul("Full name", payload.full_name.as_deref()),
        no_nul("Phone", payload.phone.as_deref()),
        no_nul("Gender", payload.gender.as_deref()),
        no_nul("Address", payload.address.as_deref()),
        no_nul("Generated id", payload.generated_id.as_deref()),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}
