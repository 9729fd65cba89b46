//! Generation request validation.
//!
//! # Validation Rules
//!
//! Checked in this order; the first failing rule is reported:
//!
//! 1. `first_names` is not empty
//! 2. `last_names` is not empty
//! 3. `domains` is not empty
//! 4. `min_age <= max_age`
//! 5. both ages are non-negative
//! 6. `cities` is not empty

use crate::error::GenerationError;
use crate::record::GenerationRequest;

/// Validates a generation request.
///
/// # Errors
///
/// Returns the [`GenerationError`] for the first rule the request breaks.
///
/// # Examples
///
/// ```
/// use sample_data::{GenerationError, GenerationRequest, validate_request};
///
/// let request = GenerationRequest {
///     first_names: vec!["Ann".to_owned()],
///     last_names: vec!["Lee".to_owned()],
///     domains: vec!["x.com".to_owned()],
///     min_age: 30,
///     max_age: 20,
///     cities: vec![],
/// };
///
/// // Inverted bounds are reported before the missing cities.
/// assert_eq!(
///     validate_request(&request),
///     Err(GenerationError::InvertedAgeRange { min_age: 30, max_age: 20 })
/// );
/// ```
pub fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    if request.first_names.is_empty() {
        return Err(GenerationError::EmptyFirstNames);
    }
    if request.last_names.is_empty() {
        return Err(GenerationError::EmptyLastNames);
    }
    if request.domains.is_empty() {
        return Err(GenerationError::EmptyDomains);
    }
    if request.min_age > request.max_age {
        return Err(GenerationError::InvertedAgeRange {
            min_age: request.min_age,
            max_age: request.max_age,
        });
    }
    if request.min_age < 0 || request.max_age < 0 {
        return Err(GenerationError::NegativeAge);
    }
    if request.cities.is_empty() {
        return Err(GenerationError::EmptyCities);
    }
    Ok(())
}
