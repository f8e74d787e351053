//! The donor record and its projections
//!
//! [`Donor`] is the stored record. [`DonorPayload`] is the partial shape a
//! client sends; it becomes a [`NewDonor`] (create) or [`DonorFields`]
//! (update) once it passes validation. [`DonorView`] is what the API returns:
//! the stored fields plus the computed `age`.

use crate::core::validation;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Prefix of server-generated donor identifiers
pub const GENERATED_ID_PREFIX: &str = "DN";

/// Timestamp layout appended to [`GENERATED_ID_PREFIX`]
const GENERATED_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// A stored blood donor record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Primary key assigned by the store
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    #[serde(serialize_with = "date_format::serialize")]
    pub birth_date: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    /// Human-facing identifier, fixed at creation
    pub generated_id: String,
    pub number_of_donations: i32,
}

impl Donor {
    /// Age in whole years as of `today`
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.birth_date, today)
    }

    /// Overwrite every mutable field, leaving `id` and `generated_id` alone
    pub fn apply(&mut self, fields: DonorFields) {
        self.full_name = fields.full_name;
        self.phone = fields.phone;
        self.birth_date = fields.birth_date;
        self.gender = fields.gender;
        self.address = fields.address;
        self.number_of_donations = fields.number_of_donations;
    }

    /// Project the record for an API response, computing `age` as of today
    pub fn into_view(self) -> DonorView {
        let today = Local::now().date_naive();
        self.into_view_at(today)
    }

    pub fn into_view_at(self, today: NaiveDate) -> DonorView {
        let age = self.age_on(today);
        DonorView { donor: self, age }
    }
}

/// The replaceable part of a donor record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonorFields {
    pub full_name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    pub number_of_donations: i32,
}

/// A validated donor waiting for the store to assign its `id`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDonor {
    pub generated_id: String,
    pub fields: DonorFields,
}

impl NewDonor {
    /// Materialize the stored record once the store has picked an id
    pub fn into_donor(self, id: i64) -> Donor {
        let fields = self.fields;
        Donor {
            id,
            full_name: fields.full_name,
            phone: fields.phone,
            birth_date: fields.birth_date,
            gender: fields.gender,
            address: fields.address,
            generated_id: self.generated_id,
            number_of_donations: fields.number_of_donations,
        }
    }
}

/// Response body for a single donor
#[derive(Clone, Debug, Serialize)]
pub struct DonorView {
    #[serde(flatten)]
    pub donor: Donor,
    pub age: i32,
}

/// Donor JSON as received from clients
///
/// Every field is optional so that validation can report all missing fields
/// in one response instead of failing on the first one during parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonorPayload {
    pub id: Option<i64>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "date_format::deserialize_optional")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub generated_id: Option<String>,
    pub number_of_donations: Option<i32>,
}

impl DonorPayload {
    /// Whether the client picked its own non-blank `generatedId`
    pub fn has_generated_id(&self) -> bool {
        self.generated_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Validate and normalize the payload for insertion.
    ///
    /// A missing or blank `generatedId` is synthesized from `now`.
    pub fn into_new_donor(self, now: NaiveDateTime) -> Result<NewDonor, Vec<String>> {
        let generated_id = self
            .generated_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generate_donor_id(now));

        let fields = self.into_fields()?;
        Ok(NewDonor {
            generated_id,
            fields,
        })
    }

    /// Validate and normalize the payload into the replaceable fields
    pub fn into_fields(self) -> Result<DonorFields, Vec<String>> {
        let violations = validation::validate_donor(&self);
        if !violations.is_empty() {
            return Err(violations);
        }

        // validate_donor guarantees these are present
        let (Some(full_name), Some(phone), Some(birth_date), Some(gender)) =
            (self.full_name, self.phone, self.birth_date, self.gender)
        else {
            return Err(vec!["Donor payload is incomplete".to_string()]);
        };

        Ok(DonorFields {
            full_name,
            phone,
            birth_date,
            gender,
            address: self.address,
            number_of_donations: normalize_donations(self.number_of_donations),
        })
    }
}

/// Age in whole years, one less while `today` is still before the birth day-of-year
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if today.ordinal() < birth_date.ordinal() {
        age -= 1;
    }
    age
}

/// Build a `DN` + `YYYYMMDDHHMMSS` identifier
pub fn generate_donor_id(now: NaiveDateTime) -> String {
    format!("{}{}", GENERATED_ID_PREFIX, now.format(GENERATED_ID_FORMAT))
}

/// Missing or negative donation counts become 0
pub fn normalize_donations(count: Option<i32>) -> i32 {
    count.unwrap_or(0).max(0)
}

/// `0001-01-01`, the value an unset date deserializes to on most clients
pub fn is_zero_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.ordinal() == 1
}

/// Parse a calendar date from `YYYY-MM-DD`, a naive ISO datetime, or RFC 3339
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Serde helpers for `birthDate`
pub(crate) mod date_format {
    use super::parse_date;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    /// Blank strings and `null` read as "not provided"
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_date(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", raw))
            }),
        }
    }
}
