//! Generation request and synthetic user record types.
//!
//! These types carry no behaviour beyond serialisation. Field names
//! serialise in camelCase so generated files match what front-end fixtures
//! usually expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inputs for one synthesis call.
///
/// Ages are signed so that negative values supplied by a caller can be
/// reported rather than rejected at decode time.
///
/// # Example
///
/// ```
/// use sample_data::GenerationRequest;
///
/// let request = GenerationRequest {
///     first_names: vec!["Ann".to_owned()],
///     last_names: vec!["Lee".to_owned()],
///     domains: vec!["x.com".to_owned()],
///     min_age: 20,
///     max_age: 30,
///     cities: vec!["Rome".to_owned()],
/// };
///
/// assert_eq!(request.first_names.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// One record is produced per first name, in order.
    pub first_names: Vec<String>,
    /// Last names, reused cyclically when shorter than `first_names`.
    pub last_names: Vec<String>,
    /// E-mail domains, reused cyclically when shorter than `first_names`.
    pub domains: Vec<String>,
    /// Inclusive lower age bound.
    pub min_age: i64,
    /// Inclusive upper age bound.
    pub max_age: i64,
    /// Candidate cities; each record picks one uniformly.
    pub cities: Vec<String>,
}

/// A synthetic user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// One-based position in the generated batch.
    pub id: usize,
    /// First name as supplied.
    pub first_name: String,
    /// Last name as supplied.
    pub last_name: String,
    /// `first.last@domain`, lower-cased name parts.
    pub email: String,
    /// Lower-cased first name followed by a three-digit suffix.
    pub user_name: String,
    /// Age within the requested bounds.
    pub age: i64,
    /// City drawn from the request.
    pub city: String,
    /// Registration instant up to a year before generation.
    pub registered_at: DateTime<Utc>,
}

/// Records produced by a successful synthesis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedUsers {
    /// Generated records in id order.
    pub users: Vec<UserRecord>,
    /// Number of generated records.
    pub count: usize,
}

impl GeneratedUsers {
    /// Wraps records, deriving the count from their length.
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        let count = users.len();
        Self { users, count }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: 1,
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            email: "ann.lee@x.com".to_owned(),
            user_name: "ann123".to_owned(),
            age: 20,
            city: "Rome".to_owned(),
            registered_at: Utc
                .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid instant"),
        }
    }

    #[test]
    fn user_record_serializes_to_camel_case() {
        let json = serde_json::to_string(&record()).expect("serialize");
        assert!(json.contains("\"firstName\""));
        assert!(json.contains("\"lastName\""));
        assert!(json.contains("\"userName\""));
        assert!(json.contains("\"registeredAt\":\"2026-01-02T03:04:05Z\""));
    }

    #[test]
    fn generated_users_count_matches_records() {
        let users = GeneratedUsers::new(vec![record(), record()]);
        assert_eq!(users.count, 2);
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let json = r#"{
            "firstNames": ["Ann"],
            "lastNames": ["Lee"],
            "domains": ["x.com"],
            "minAge": 20,
            "maxAge": 30,
            "cities": ["Rome"]
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).expect("deserialize");
        assert_eq!(request.min_age, 20);
        assert_eq!(request.cities, vec!["Rome".to_owned()]);
    }
}
